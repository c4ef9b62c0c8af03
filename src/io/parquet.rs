//! Parquet reading.

use std::collections::HashMap;
use std::path::Path;

use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::FrameResult;
use crate::series::Series;
use crate::table::Table;
use crate::types::Value;

/// Read a Parquet file into a [`Table`].
///
/// Notes:
/// - Columns follow the file's top-level schema fields, so a file with no rows still yields
///   its column names
/// - Uses the Parquet record API (`RowIter`)
/// - Integer and floating-point physical types become Int and Float; other logical types
///   (dates, decimals, nested groups) are stored as their text rendering
/// - A column whose values disagree on kind (for example because of nulls) is Mixed
pub fn read_parquet_from_path(path: impl AsRef<Path>) -> FrameResult<Table> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;
    let names = top_level_columns(&reader);

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    for row_res in reader.into_iter() {
        let row = row_res?;
        let map: HashMap<&str, &Field> = row
            .get_column_iter()
            .map(|(name, field)| (name.as_str(), field))
            .collect();
        for (name, column) in names.iter().zip(columns.iter_mut()) {
            column.push(map.get(name.as_str()).map_or(Value::Null, |f| field_to_value(f)));
        }
    }

    let table = Table::from_series(
        names
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Series::new(name, values)),
    )?;
    log::debug!("parquet: read {} rows x {} columns", table.height(), table.width());
    Ok(table)
}

fn top_level_columns<R: ChunkReader + 'static>(reader: &SerializedFileReader<R>) -> Vec<String> {
    reader
        .metadata()
        .file_metadata()
        .schema()
        .get_fields()
        .iter()
        .map(|t| t.name().to_string())
        .collect()
}

fn field_to_value(f: &Field) -> Value {
    match f {
        Field::Null => Value::Null,
        Field::Bool(b) => Value::Bool(*b),
        Field::Byte(v) => Value::Int(i64::from(*v)),
        Field::Short(v) => Value::Int(i64::from(*v)),
        Field::Int(v) => Value::Int(i64::from(*v)),
        Field::Long(v) => Value::Int(*v),
        Field::UByte(v) => Value::Int(i64::from(*v)),
        Field::UShort(v) => Value::Int(i64::from(*v)),
        Field::UInt(v) => Value::Int(i64::from(*v)),
        Field::ULong(v) => i64::try_from(*v).map_or(Value::Float(*v as f64), Value::Int),
        Field::Float(v) => Value::Float(f64::from(*v)),
        Field::Double(v) => Value::Float(*v),
        Field::Str(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

//! Delimited-text (CSV) reading and writing.
//!
//! Reading produces one series per column, inferring each column's kind from its text
//! when [`CsvReadOptions::infer_types`] is set (see [`crate::inference`]). Rows shorter
//! than the header are padded with blank cells; extra cells are ignored.
//!
//! ```
//! use rust_dataframe::io::csv::{read_csv_from_str, to_csv_string, CsvReadOptions, CsvWriteOptions};
//! use rust_dataframe::types::Kind;
//!
//! let table = read_csv_from_str("name,age\nann,35\nbob,23\n", &CsvReadOptions::default())?;
//! assert_eq!(table.column("age").unwrap().kind(), Kind::Int);
//! assert_eq!(to_csv_string(&table, &CsvWriteOptions::default())?, "name,age\nann,35\nbob,23\n");
//! # Ok::<(), rust_dataframe::error::FrameError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::inference::series_from_text;
use crate::table::Table;
use crate::types::Value;

/// Options for reading delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvReadOptions {
    /// The first record holds column names. Otherwise columns are named `Column {i}`.
    pub header: bool,
    /// Field separator; must be ASCII.
    pub delimiter: char,
    /// Strip leading whitespace from every field. Not allowed with a space or tab delimiter.
    pub trim_leading_space: bool,
    /// Choose each column's kind from its text; otherwise every column is Text.
    pub infer_types: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            header: true,
            delimiter: ',',
            trim_leading_space: false,
            infer_types: true,
        }
    }
}

impl CsvReadOptions {
    /// Check option compatibility and return the delimiter byte.
    pub fn validate(&self) -> FrameResult<u8> {
        if self.trim_leading_space && matches!(self.delimiter, ' ' | '\t') {
            return Err(FrameError::Unsupported {
                message: "trim_leading_space cannot be used with a space or tab delimiter"
                    .to_string(),
            });
        }
        delimiter_byte(self.delimiter)
    }
}

/// Options for writing delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvWriteOptions {
    /// Write column names as the first record.
    pub header: bool,
    /// Field separator; must be ASCII.
    pub delimiter: char,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            header: true,
            delimiter: ',',
        }
    }
}

impl CsvWriteOptions {
    /// Return the delimiter byte, or an error if it is not ASCII.
    pub fn validate(&self) -> FrameResult<u8> {
        delimiter_byte(self.delimiter)
    }
}

fn delimiter_byte(delimiter: char) -> FrameResult<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(FrameError::Unsupported {
            message: format!("delimiter {delimiter:?} is not a single ASCII character"),
        })
    }
}

fn reader_builder(options: &CsvReadOptions) -> FrameResult<csv::ReaderBuilder> {
    let delimiter = options.validate()?;
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true).delimiter(delimiter);
    Ok(builder)
}

/// Read a CSV file into a [`Table`].
pub fn read_csv_from_path(path: impl AsRef<Path>, options: &CsvReadOptions) -> FrameResult<Table> {
    let mut rdr = reader_builder(options)?.from_path(path)?;
    read_records(&mut rdr, options)
}

/// Read CSV data from any reader.
pub fn read_csv_from_reader<R: Read>(reader: R, options: &CsvReadOptions) -> FrameResult<Table> {
    let mut rdr = reader_builder(options)?.from_reader(reader);
    read_records(&mut rdr, options)
}

/// Read CSV data held in memory.
pub fn read_csv_from_str(input: &str, options: &CsvReadOptions) -> FrameResult<Table> {
    read_csv_from_reader(input.as_bytes(), options)
}

fn read_records<R: Read>(rdr: &mut csv::Reader<R>, options: &CsvReadOptions) -> FrameResult<Table> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| {
                if options.trim_leading_space {
                    field.trim_start().to_owned()
                } else {
                    field.to_owned()
                }
            })
            .collect();
        rows.push(row);
    }
    let table = table_from_rows(rows, options.header, options.infer_types)?;
    log::debug!("csv: read {} rows x {} columns", table.height(), table.width());
    Ok(table)
}

fn default_name(index: usize) -> String {
    format!("Column {index}")
}

/// Build a table from row-major text cells.
///
/// With `header`, the first row names the columns; otherwise they are named
/// `Column 0`, `Column 1`, .... The first row also fixes the column count.
pub fn table_from_rows(rows: Vec<Vec<String>>, header: bool, infer_types: bool) -> FrameResult<Table> {
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(Table::new());
    };
    let (names, pending) = if header {
        (first, None)
    } else {
        ((0..first.len()).map(default_name).collect(), Some(first))
    };

    let width = names.len();
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];
    let mut ragged = 0_usize;
    for row in pending.into_iter().chain(rows) {
        if row.len() != width {
            ragged += 1;
        }
        let mut cells = row.into_iter();
        for column in &mut columns {
            column.push(cells.next().unwrap_or_default());
        }
    }
    if ragged > 0 {
        log::warn!("csv: {ragged} row(s) did not have {width} fields; padded or truncated");
    }

    Table::from_series(
        names
            .into_iter()
            .zip(columns)
            .map(|(name, cells)| series_from_text(name, cells, infer_types)),
    )
}

/// Build a table from column-major text cells.
///
/// With `header`, the first cell of each column is its name (an empty column keeps the
/// default `Column {i}` name). Columns of different lengths are a
/// [`FrameError::DimensionMismatch`].
pub fn table_from_columns(
    columns: Vec<Vec<String>>,
    header: bool,
    infer_types: bool,
) -> FrameResult<Table> {
    Table::from_series(columns.into_iter().enumerate().map(|(i, mut cells)| {
        let name = if header && !cells.is_empty() {
            cells.remove(0)
        } else {
            default_name(i)
        };
        series_from_text(name, cells, infer_types)
    }))
}

/// Write `table` as CSV to `writer`. Every value is rendered as text.
///
/// A table without columns is refused with [`FrameError::Unsupported`].
pub fn write_csv_to_writer<W: Write>(
    table: &Table,
    writer: W,
    options: &CsvWriteOptions,
) -> FrameResult<()> {
    ensure_writable(table)?;
    let delimiter = options.validate()?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    if options.header {
        wtr.write_record(table.column_names())?;
    }
    let columns: Vec<Vec<Value>> = table.columns().iter().map(|s| s.values()).collect();
    for row in 0..table.height() {
        wtr.write_record(columns.iter().map(|c| c[row].to_text()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` as CSV to a file, creating or truncating it.
pub fn write_csv_to_path(
    table: &Table,
    path: impl AsRef<Path>,
    options: &CsvWriteOptions,
) -> FrameResult<()> {
    ensure_writable(table)?;
    let file = File::create(path)?;
    write_csv_to_writer(table, BufWriter::new(file), options)
}

/// Render `table` as a CSV string.
pub fn to_csv_string(table: &Table, options: &CsvWriteOptions) -> FrameResult<String> {
    let mut buf = Vec::new();
    write_csv_to_writer(table, &mut buf, options)?;
    String::from_utf8(buf)
        .map_err(|e| FrameError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn ensure_writable(table: &Table) -> FrameResult<()> {
    if table.is_empty() {
        return Err(FrameError::Unsupported {
            message: "cannot write a table with no columns".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        read_csv_from_str, table_from_columns, table_from_rows, to_csv_string, CsvReadOptions,
        CsvWriteOptions,
    };
    use crate::error::FrameError;
    use crate::table::Table;
    use crate::types::{Kind, Value};

    fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn trim_with_space_delimiter_is_rejected() {
        let opts = CsvReadOptions {
            delimiter: ' ',
            trim_leading_space: true,
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(FrameError::Unsupported { .. })));
        let opts = CsvReadOptions {
            delimiter: '→',
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn headerless_input_gets_default_names() {
        let opts = CsvReadOptions {
            header: false,
            ..Default::default()
        };
        let t = read_csv_from_str("10,a\n20,b\n", &opts).unwrap();
        assert_eq!(t.column_names(), ["Column 0", "Column 1"]);
        assert_eq!(t.column("Column 0").unwrap().kind(), Kind::Int);
    }

    #[test]
    fn trim_leading_space_and_custom_delimiter() {
        let opts = CsvReadOptions {
            delimiter: ';',
            trim_leading_space: true,
            ..Default::default()
        };
        let t = read_csv_from_str("name; score\n ann; 89.6\n", &opts).unwrap();
        assert_eq!(t.column_names(), ["name", "score"]);
        assert_eq!(t.row(0).unwrap(), vec![Value::from("ann"), Value::Float(89.6)]);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = read_csv_from_str("a,b\n1,2\n3\n", &CsvReadOptions::default()).unwrap();
        assert_eq!(t.column("b").unwrap().values(), vec![Value::Int(2), Value::Int(0)]);
    }

    #[test]
    fn empty_input_is_empty_table() {
        let t = read_csv_from_str("", &CsvReadOptions::default()).unwrap();
        assert_eq!(t.shape(), (0, 0));
    }

    #[test]
    fn without_inference_everything_is_text() {
        let opts = CsvReadOptions {
            infer_types: false,
            ..Default::default()
        };
        let t = read_csv_from_str("n\n1\n", &opts).unwrap();
        assert_eq!(t.column("n").unwrap().kind(), Kind::Text);
    }

    #[test]
    fn rows_and_columns_builders_agree() {
        let by_rows = table_from_rows(strings(&[&["k", "v"], &["x", "1"], &["y", "2"]]), true, true)
            .unwrap();
        let by_cols =
            table_from_columns(strings(&[&["k", "x", "y"], &["v", "1", "2"]]), true, true).unwrap();
        assert_eq!(by_rows.column_names(), by_cols.column_names());
        assert_eq!(by_rows.to_rows(), by_cols.to_rows());
    }

    #[test]
    fn uneven_columns_are_rejected() {
        let err = table_from_columns(strings(&[&["1", "2"], &["3"]]), false, true).unwrap_err();
        assert!(matches!(err, FrameError::DimensionMismatch { .. }));
    }

    #[test]
    fn writer_renders_text_and_honours_options() {
        let t = read_csv_from_str("a,b\n1.5,true\n", &CsvReadOptions::default()).unwrap();
        let opts = CsvWriteOptions {
            header: false,
            delimiter: '\t',
        };
        assert_eq!(to_csv_string(&t, &opts).unwrap(), "1.5\ttrue\n");
    }

    #[test]
    fn writing_empty_table_is_unsupported() {
        let err = to_csv_string(&Table::new(), &CsvWriteOptions::default()).unwrap_err();
        assert!(matches!(err, FrameError::Unsupported { .. }));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: CsvReadOptions = serde_json::from_str(r#"{"delimiter":"|"}"#).unwrap();
        assert_eq!(opts.delimiter, '|');
        assert!(opts.header);
        assert!(opts.infer_types);
    }
}

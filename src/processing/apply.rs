//! Derive a column from existing ones.
//!
//! Three call styles, all writing a column called `output` (replacing any column of
//! that name, otherwise appending):
//!
//! - [`apply_index`]: one call per row with the values of the chosen input columns
//! - [`apply_map`]: one call per row with the whole row keyed by column name
//! - [`apply_series`]: one call with the chosen input columns as series
//!
//! The kind of an index- or map-style result is chosen by [`Series::new`] from the
//! returned values.

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::table::{ColumnSelector, Row, Table};
use crate::types::Value;

/// Compute `output` row by row from the `inputs` columns.
///
/// `f` receives the input values in selector order.
///
/// ```
/// use rust_dataframe::processing::apply_index;
/// use rust_dataframe::series::Series;
/// use rust_dataframe::table::Table;
/// use rust_dataframe::types::Value;
///
/// let mut t = Table::from_series([
///     Series::from_ints("a", vec![1, 2]),
///     Series::from_ints("b", vec![10, 20]),
/// ])?;
/// apply_index(&mut t, ["a", "b"], "total", |row| {
///     Value::Int(row[0].as_int().unwrap_or(0) + row[1].as_int().unwrap_or(0))
/// })?;
/// assert_eq!(t.column("total").unwrap().values(), vec![Value::Int(11), Value::Int(22)]);
/// # Ok::<(), rust_dataframe::error::FrameError>(())
/// ```
pub fn apply_index<F>(
    table: &mut Table,
    inputs: impl Into<ColumnSelector>,
    output: &str,
    mut f: F,
) -> FrameResult<()>
where
    F: FnMut(&[Value]) -> Value,
{
    let positions = table.resolve(&inputs.into())?;
    let columns: Vec<Vec<Value>> = positions
        .iter()
        .map(|&i| table.columns()[i].values())
        .collect();
    let mut args = Vec::with_capacity(columns.len());
    let mut out = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        args.clear();
        args.extend(columns.iter().map(|c| c[row].clone()));
        out.push(f(&args));
    }
    table.put_series(Series::new(output, out))
}

/// Compute `output` row by row from the whole row.
pub fn apply_map<F>(table: &mut Table, output: &str, mut f: F) -> FrameResult<()>
where
    F: FnMut(&Row) -> Value,
{
    let out = row_maps(table).iter().map(&mut f).collect();
    table.put_series(Series::new(output, out))
}

/// Compute `output` in one call from whole input columns.
///
/// The returned series is renamed to `output` and must have one value per row.
pub fn apply_series<F>(
    table: &mut Table,
    inputs: impl Into<ColumnSelector>,
    output: &str,
    f: F,
) -> FrameResult<()>
where
    F: FnOnce(&[Series]) -> Series,
{
    let positions = table.resolve(&inputs.into())?;
    let selected: Vec<Series> = positions
        .iter()
        .map(|&i| table.columns()[i].clone())
        .collect();
    let mut result = f(&selected);
    if !table.is_empty() && result.len() != table.height() {
        return Err(FrameError::DimensionMismatch {
            context: "apply series",
            expected: table.height(),
            found: result.len(),
        });
    }
    result.rename(output);
    table.put_series(result)
}

/// Every row of `table` keyed by column name.
pub(crate) fn row_maps(table: &Table) -> Vec<Row> {
    let columns: Vec<(&str, Vec<Value>)> = table
        .columns()
        .iter()
        .map(|s| (s.name(), s.values()))
        .collect();
    (0..table.height())
        .map(|r| {
            columns
                .iter()
                .map(|(name, values)| ((*name).to_owned(), values[r].clone()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{apply_index, apply_map, apply_series};
    use crate::error::FrameError;
    use crate::series::Series;
    use crate::table::Table;
    use crate::types::{Kind, Value};

    fn people() -> Table {
        Table::from_series([
            Series::from_texts("name", ["ann", "bob"]),
            Series::from_ints("age", vec![35, 23]),
        ])
        .unwrap()
    }

    #[test]
    fn apply_index_appends_new_column() {
        let mut t = people();
        apply_index(&mut t, "age", "adult", |v| {
            Value::Bool(v[0].as_int().is_some_and(|a| a >= 30))
        })
        .unwrap();
        let adult = t.column("adult").unwrap();
        assert_eq!(adult.kind(), Kind::Bool);
        assert_eq!(adult.values(), vec![Value::Bool(true), Value::Bool(false)]);
    }

    #[test]
    fn apply_index_replaces_same_name() {
        let mut t = people();
        apply_index(&mut t, [1_usize], "age", |v| {
            Value::Int(v[0].as_int().unwrap_or(0) + 1)
        })
        .unwrap();
        assert_eq!(t.width(), 2);
        assert_eq!(t.column("age").unwrap().get(1), Some(Value::Int(24)));
    }

    #[test]
    fn apply_index_unknown_input_fails() {
        let mut t = people();
        let err = apply_index(&mut t, "nope", "x", |_| Value::Null).unwrap_err();
        assert!(matches!(err, FrameError::UnknownColumn { .. }));
        assert_eq!(t.width(), 2);
    }

    #[test]
    fn apply_map_sees_whole_row() {
        let mut t = people();
        apply_map(&mut t, "label", |row| {
            Value::Text(format!("{}:{}", row["name"], row["age"]))
        })
        .unwrap();
        assert_eq!(t.column("label").unwrap().get(0), Some(Value::from("ann:35")));
    }

    #[test]
    fn apply_series_checks_length() {
        let mut t = people();
        apply_series(&mut t, ["age"], "age_f", |cols| {
            cols[0].as_type(Kind::Float).unwrap_or_else(|_| cols[0].clone())
        })
        .unwrap();
        assert_eq!(t.column("age_f").unwrap().kind(), Kind::Float);

        let err = apply_series(&mut t, ["age"], "short", |_| Series::from_ints("x", vec![1]))
            .unwrap_err();
        assert!(matches!(err, FrameError::DimensionMismatch { expected: 2, found: 1, .. }));
    }
}

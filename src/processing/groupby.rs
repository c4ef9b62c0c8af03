//! Group rows by key columns and aggregate the rest.
//!
//! Keys are structural: the integer `1` and the text `"1"` fall in different groups.
//! Output rows are ordered by the key rendered as text (`"{value}|"` per key column),
//! with ties between differently typed values broken by their typed parts.

use std::collections::BTreeMap;

use crate::processing::aggregate::Aggregator;
use crate::series::Series;
use crate::table::Table;
use crate::types::Value;

/// Aggregation name that counts the rows of each group instead of reading a column.
pub const COUNT_COLUMN: &str = "count";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum KeyPart {
    Null,
    Int(i64),
    Float(u64),
    Text(String),
    Bool(bool),
}

impl KeyPart {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => KeyPart::Null,
            Value::Int(v) => KeyPart::Int(*v),
            Value::Float(v) => KeyPart::Float(canonical_bits(*v)),
            Value::Text(v) => KeyPart::Text(v.clone()),
            Value::Bool(v) => KeyPart::Bool(*v),
        }
    }
}

/// `0.0` and `-0.0` share one group, as do all NaNs.
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0_f64.to_bits()
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    label: String,
    parts: Vec<KeyPart>,
}

impl GroupKey {
    fn of_row(keys: &[Vec<Value>], row: usize) -> Self {
        let mut label = String::new();
        let mut parts = Vec::with_capacity(keys.len());
        for column in keys {
            let value = &column[row];
            label.push_str(&value.to_text());
            label.push('|');
            parts.push(KeyPart::of(value));
        }
        GroupKey { label, parts }
    }
}

/// Group `table` by the `by` columns and aggregate other columns per group.
///
/// - If any `by` column is missing the result is an empty table.
/// - The output starts with the key columns (values from each group's first row),
///   followed by one column per aggregation in the order given.
/// - An aggregation named [`COUNT_COLUMN`] yields the number of rows in each group,
///   whatever aggregator is attached to it.
/// - Aggregations naming a key column or a missing column are skipped.
/// - A combined aggregator produces one column per part, named `{column}_{part}`.
///
/// ```
/// use rust_dataframe::processing::{group_by, Aggregator};
/// use rust_dataframe::series::Series;
/// use rust_dataframe::table::Table;
/// use rust_dataframe::types::Value;
///
/// let table = Table::from_series([
///     Series::from_texts("category", ["A", "B", "A"]),
///     Series::from_ints("sales", vec![100, 200, 150]),
/// ])?;
/// let out = group_by(&table, &["category"], &[("sales", Aggregator::sum())]);
/// assert_eq!(out.to_rows(), vec![
///     vec![Value::from("A"), Value::Int(250)],
///     vec![Value::from("B"), Value::Int(200)],
/// ]);
/// # Ok::<(), rust_dataframe::error::FrameError>(())
/// ```
pub fn group_by<B, A>(table: &Table, by: &[B], aggregations: &[(A, Aggregator)]) -> Table
where
    B: AsRef<str>,
    A: AsRef<str>,
{
    let by: Vec<&str> = by.iter().map(AsRef::as_ref).collect();
    let mut key_series = Vec::with_capacity(by.len());
    for name in &by {
        match table.column(name) {
            Some(s) => key_series.push(s),
            None => {
                log::warn!("group by: key column '{name}' not found, returning an empty table");
                return Table::new();
            }
        }
    }

    let key_values: Vec<Vec<Value>> = key_series.iter().map(|s| s.values()).collect();
    let mut groups: BTreeMap<GroupKey, Vec<usize>> = BTreeMap::new();
    for row in 0..table.height() {
        groups
            .entry(GroupKey::of_row(&key_values, row))
            .or_default()
            .push(row);
    }
    let buckets: Vec<&Vec<usize>> = groups.values().collect();

    let mut output: Vec<Series> = key_series
        .iter()
        .zip(&key_values)
        .map(|(source, values)| {
            let firsts = buckets.iter().map(|rows| values[rows[0]].clone()).collect();
            Series::from_kind_values(source.name(), source.kind(), firsts)
        })
        .collect();

    for (column, aggregator) in aggregations {
        let column = column.as_ref();
        if column == COUNT_COLUMN {
            let counts = buckets.iter().map(|rows| rows.len() as i64).collect();
            output.push(Series::from_ints(COUNT_COLUMN, counts));
            continue;
        }
        if by.contains(&column) {
            log::debug!("group by: skipping aggregation of key column '{column}'");
            continue;
        }
        let Some(source) = table.column(column) else {
            log::debug!("group by: skipping aggregation of missing column '{column}'");
            continue;
        };
        output.extend(aggregate_groups(source, aggregator, &buckets));
    }

    Table::from_aligned(output)
}

/// Aggregate one column per bucket, expanding combined results into several columns.
fn aggregate_groups(source: &Series, aggregator: &Aggregator, buckets: &[&Vec<usize>]) -> Vec<Series> {
    let values = source.values();
    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<Value>> = Vec::new();
    let mut fallbacks = 0_usize;

    for (group, rows) in buckets.iter().enumerate() {
        let group_values: Vec<Value> = rows.iter().map(|&r| values[r].clone()).collect();
        let result = aggregator.apply(&group_values);
        if result.is_fallback() {
            fallbacks += 1;
        }
        for (name, value) in result.flatten(source.name()) {
            let slot = match names.iter().position(|n| *n == name) {
                Some(i) => i,
                None => {
                    names.push(name);
                    columns.push(vec![Value::Null; group]);
                    columns.len() - 1
                }
            };
            columns[slot].push(value);
        }
        for column in &mut columns {
            column.resize(group + 1, Value::Null);
        }
    }

    if fallbacks > 0 {
        log::warn!(
            "group by: '{}' over column '{}' fell back to a default value in {fallbacks} group(s)",
            aggregator.name(),
            source.name()
        );
    }

    if names.is_empty() {
        // No groups: keep one empty column named after the source.
        return vec![Series::new(source.name(), Vec::new())];
    }
    names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Series::new(name, values))
        .collect()
}

impl Table {
    /// See [`group_by`].
    pub fn group_by<B, A>(&self, by: &[B], aggregations: &[(A, Aggregator)]) -> Table
    where
        B: AsRef<str>,
        A: AsRef<str>,
    {
        group_by(self, by, aggregations)
    }
}

#[cfg(test)]
mod tests {
    use super::group_by;
    use crate::processing::aggregate::{Aggregate, Aggregator};
    use crate::series::Series;
    use crate::table::Table;
    use crate::types::{Kind, Value};

    fn sales() -> Table {
        Table::from_series([
            Series::from_texts("region", ["N", "S", "N", "S", "N"]),
            Series::from_texts("category", ["A", "B", "A", "A", "B"]),
            Series::from_ints("sales", vec![100, 200, 150, 50, 25]),
        ])
        .unwrap()
    }

    #[test]
    fn groups_are_sorted_and_summed() {
        let out = group_by(&sales(), &["category"], &[("sales", Aggregator::sum())]);
        assert_eq!(out.column_names(), ["category", "sales"]);
        assert_eq!(
            out.to_rows(),
            vec![
                vec![Value::from("A"), Value::Int(300)],
                vec![Value::from("B"), Value::Int(225)],
            ]
        );
    }

    #[test]
    fn multi_column_keys_and_count() {
        let out = group_by(
            &sales(),
            &["region", "category"],
            &[("count", Aggregator::first()), ("sales", Aggregator::max())],
        );
        assert_eq!(out.column_names(), ["region", "category", "count", "sales"]);
        assert_eq!(out.height(), 4);
        assert_eq!(
            out.row(0).unwrap(),
            vec![Value::from("N"), Value::from("A"), Value::Int(2), Value::Int(150)]
        );
    }

    #[test]
    fn missing_key_column_gives_empty_table() {
        let out = group_by(&sales(), &["nope"], &[("sales", Aggregator::sum())]);
        assert_eq!(out.shape(), (0, 0));
    }

    #[test]
    fn key_and_missing_columns_are_skipped() {
        let out = group_by(
            &sales(),
            &["category"],
            &[("category", Aggregator::count()), ("ghost", Aggregator::sum())],
        );
        assert_eq!(out.column_names(), ["category"]);
    }

    #[test]
    fn structural_keys_separate_int_and_text() {
        let t = Table::from_series([
            Series::mixed("k", vec![Value::Int(1), Value::from("1"), Value::Int(1)]),
            Series::from_ints("v", vec![1, 2, 3]),
        ])
        .unwrap();
        let out = group_by(&t, &["k"], &[("v", Aggregator::sum())]);
        assert_eq!(out.height(), 2);
        assert_eq!(out.column("k").unwrap().kind(), Kind::Mixed);
        assert_eq!(out.column("v").unwrap().values(), vec![Value::Int(4), Value::Int(2)]);
    }

    #[test]
    fn combined_aggregator_expands_columns() {
        let agg = Aggregator::combine([Aggregator::min(), Aggregator::mean()]);
        let out = group_by(&sales(), &["region"], &[("sales", agg)]);
        assert_eq!(out.column_names(), ["region", "sales_min", "sales_mean"]);
        assert_eq!(out.column("sales_mean").unwrap().get(1), Some(Value::Float(125.0)));
    }

    #[test]
    fn sum_is_preserved_across_groups() {
        let t = sales();
        let out = t.group_by(&["region"], &[("sales", Aggregator::sum())]);
        let total = out.aggregate("sales", &Aggregator::sum()).unwrap();
        assert_eq!(total, t.aggregate("sales", &Aggregator::sum()).unwrap());
        assert_eq!(total, Aggregate::Value(Value::Int(525)));
    }
}

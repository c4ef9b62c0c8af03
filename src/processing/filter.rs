//! Row filtering for [`Table`].
//!
//! Rows for which the predicate returns `false` are removed in place. Surviving rows
//! keep their order.

use crate::error::FrameResult;
use crate::processing::apply::row_maps;
use crate::table::{ColumnSelector, Row, Table};
use crate::types::Value;

/// Keep rows for which `predicate` returns `true`, given the values of the `inputs`
/// columns in selector order.
pub fn filter_index<F>(
    table: &mut Table,
    inputs: impl Into<ColumnSelector>,
    mut predicate: F,
) -> FrameResult<()>
where
    F: FnMut(&[Value]) -> bool,
{
    let positions = table.resolve(&inputs.into())?;
    let columns: Vec<Vec<Value>> = positions
        .iter()
        .map(|&i| table.columns()[i].values())
        .collect();
    let mut args = Vec::with_capacity(columns.len());
    let mut rejected = Vec::new();
    for row in 0..table.height() {
        args.clear();
        args.extend(columns.iter().map(|c| c[row].clone()));
        if !predicate(&args) {
            rejected.push(row);
        }
    }
    table.drop_rows(&rejected)
}

/// Keep rows for which `predicate` returns `true`, given the whole row.
pub fn filter_map<F>(table: &mut Table, mut predicate: F) -> FrameResult<()>
where
    F: FnMut(&Row) -> bool,
{
    let rejected: Vec<usize> = row_maps(table)
        .iter()
        .enumerate()
        .filter(|(_, row)| !predicate(row))
        .map(|(i, _)| i)
        .collect();
    table.drop_rows(&rejected)
}

#[cfg(test)]
mod tests {
    use super::{filter_index, filter_map};
    use crate::series::Series;
    use crate::table::Table;
    use crate::types::Value;

    fn sample() -> Table {
        Table::from_series([
            Series::from_ints("id", vec![1, 2, 3, 4]),
            Series::from_bools("active", vec![true, false, true, false]),
            Series::from_texts("name", ["a", "b", "c", "d"]),
        ])
        .unwrap()
    }

    #[test]
    fn filter_index_by_numeric_predicate() {
        let mut t = sample();
        filter_index(&mut t, "id", |v| v[0].as_int().is_some_and(|id| id > 2)).unwrap();
        assert_eq!(
            t.to_rows(),
            vec![
                vec![Value::Int(3), Value::Bool(true), Value::from("c")],
                vec![Value::Int(4), Value::Bool(false), Value::from("d")],
            ]
        );
    }

    #[test]
    fn filter_map_by_bool_column() {
        let mut t = sample();
        filter_map(&mut t, |row| row["active"] == Value::Bool(true)).unwrap();
        assert_eq!(
            t.column("name").unwrap().values(),
            vec![Value::from("a"), Value::from("c")]
        );
    }

    #[test]
    fn filter_can_remove_every_row() {
        let mut t = sample();
        filter_map(&mut t, |_| false).unwrap();
        assert_eq!(t.shape(), (0, 3));
    }

    #[test]
    fn filter_leaves_selection_source_alone() {
        let t = sample();
        let mut view = t.select(["id", "name"]).unwrap();
        filter_index(&mut view, [0_usize], |v| v[0] == Value::Int(1)).unwrap();
        assert_eq!(view.height(), 1);
        assert_eq!(t.height(), 4);
    }
}

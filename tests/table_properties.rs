use rust_dataframe::inference::series_from_text;
use rust_dataframe::processing::{group_by, Aggregate, Aggregator};
use rust_dataframe::series::Series;
use rust_dataframe::table::Table;
use rust_dataframe::types::{Kind, Value};

fn sales() -> Table {
    Table::from_series([
        Series::from_texts("category", ["A", "B", "A"]),
        Series::from_ints("sales", vec![100, 200, 150]),
    ])
    .unwrap()
}

fn assert_heights_agree(t: &Table) {
    for s in t.columns() {
        assert_eq!(s.len(), t.height(), "column '{}'", s.name());
    }
}

#[test]
fn height_matches_every_column_after_each_mutation() {
    let mut t = sales();
    assert_heights_agree(&t);

    t.add_row(vec![Value::from("C"), Value::Float(1.5)]).unwrap();
    assert_heights_agree(&t);
    assert_eq!(t.column("sales").unwrap().kind(), Kind::Mixed);

    t.drop_rows(&[0, 2]).unwrap();
    assert_heights_agree(&t);

    t.put_series(Series::from_bools("flag", vec![true, false])).unwrap();
    assert_heights_agree(&t);

    assert!(t.add_series(Series::from_ints("bad", vec![1])).is_err());
    assert!(t.add_row(vec![Value::Null]).is_err());
    assert!(t.drop_row(10).is_err());
    assert_heights_agree(&t);
    assert_eq!(t.shape(), (2, 3));
}

#[test]
fn height_holds_when_a_selected_alias_shrinks() {
    let mut t = sales();
    let mut view = t.select("sales").unwrap();
    view.drop_row(0).unwrap();
    assert_eq!(view.height(), 2);
    assert_heights_agree(&t);
    assert_eq!(t.height(), 3);

    t.drop_row(1).unwrap();
    assert_heights_agree(&t);
    assert_eq!(view.height(), 2);
}

#[test]
fn add_row_then_drop_row_restores_content() {
    let mut t = sales();
    let before = t.to_rows();
    t.add_row(vec![Value::from("Z"), Value::Int(1)]).unwrap();
    t.drop_row(t.height() - 1).unwrap();
    assert_eq!(t.to_rows(), before);
}

#[test]
fn int_to_float_to_int_round_trips() {
    let original = vec![-3, 0, 7, 1 << 40];
    let s = Series::from_ints("n", original.clone());
    let back = s.as_type(Kind::Float).unwrap().as_type(Kind::Int).unwrap();
    assert_eq!(back.int_column().unwrap().to_vec(), original);
}

#[test]
fn drop_rows_ignores_index_order() {
    let mut a = sales();
    let mut b = sales();
    a.drop_rows(&[2, 0]).unwrap();
    b.drop_rows(&[0, 2, 0]).unwrap();
    assert_eq!(a.to_rows(), b.to_rows());
    assert_eq!(a.to_rows(), vec![vec![Value::from("B"), Value::Int(200)]]);
}

#[test]
fn grouped_sums_add_up_to_the_total() {
    let t = Table::from_series([
        Series::from_texts("k", ["x", "y", "x", "z", "y", "x"]),
        Series::from_ints("v", vec![5, -2, 9, 40, 1, 3]),
    ])
    .unwrap();
    let total = t.aggregate("v", &Aggregator::sum()).unwrap();
    let grouped = group_by(&t, &["k"], &[("v", Aggregator::sum())]);
    let regrouped: i64 = grouped
        .column("v")
        .unwrap()
        .values()
        .iter()
        .filter_map(Value::as_int)
        .sum();
    assert_eq!(total, Aggregate::Value(Value::Int(regrouped)));
}

#[test]
fn group_by_category_sums_sales() {
    let out = group_by(&sales(), &["category"], &[("sales", Aggregator::sum())]);
    assert_eq!(out.column_names(), ["category", "sales"]);
    assert_eq!(
        out.to_rows(),
        vec![
            vec![Value::from("A"), Value::Int(250)],
            vec![Value::from("B"), Value::Int(200)],
        ]
    );
}

#[test]
fn select_shares_storage_with_the_source() {
    let t = sales();
    let view = t.select("sales").unwrap();
    view.column("sales").unwrap().set(0, Value::Int(999)).unwrap();
    assert_eq!(t.column("sales").unwrap().get(0), Some(Value::Int(999)));

    let copy = t.get_series("sales", true).unwrap();
    copy.set(1, Value::Int(0)).unwrap();
    assert_eq!(t.column("sales").unwrap().get(1), Some(Value::Int(200)));
}

#[test]
fn inferred_ints_from_text() {
    let s = series_from_text("age", vec!["35".into(), "23".into(), "48".into()], true);
    assert_eq!(s.kind(), Kind::Int);
    assert_eq!(s.values(), vec![Value::Int(35), Value::Int(23), Value::Int(48)]);
}

#[test]
fn sum_and_mean_of_one_to_five() {
    let s = Series::from_ints("n", vec![1, 2, 3, 4, 5]);
    assert_eq!(s.aggregate(&Aggregator::sum()), Aggregate::Value(Value::Int(15)));
    assert_eq!(s.aggregate(&Aggregator::mean()), Aggregate::Value(Value::Float(3.0)));
}

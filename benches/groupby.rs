use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_dataframe::processing::{group_by, Aggregator};
use rust_dataframe::series::Series;
use rust_dataframe::table::Table;

fn sales_table(rows: usize, groups: usize) -> Table {
    let category: Vec<String> = (0..rows).map(|i| format!("cat_{}", i % groups)).collect();
    let region: Vec<i64> = (0..rows).map(|i| (i % 7) as i64).collect();
    let amount: Vec<f64> = (0..rows).map(|i| i as f64 * 0.25).collect();
    Table::from_series([
        Series::from_texts("category", category),
        Series::from_ints("region", region),
        Series::from_floats("amount", amount),
    ])
    .unwrap()
}

fn group_by_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by");
    for &rows in &[1_000_usize, 100_000] {
        let table = sales_table(rows, 50);

        group.bench_with_input(BenchmarkId::new("one_key_sum", rows), &table, |b, t| {
            b.iter(|| group_by(black_box(t), &["category"], &[("amount", Aggregator::sum())]))
        });

        group.bench_with_input(BenchmarkId::new("two_keys_mean_count", rows), &table, |b, t| {
            b.iter(|| {
                group_by(
                    black_box(t),
                    &["category", "region"],
                    &[("amount", Aggregator::mean()), ("count", Aggregator::count())],
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, group_by_benchmark);
criterion_main!(benches);

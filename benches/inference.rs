use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_dataframe::inference::{infer_kind, series_from_text};
use rust_dataframe::io::csv::{read_csv_from_str, CsvReadOptions};

fn int_cells(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{},{:03}", i / 1000, i % 1000)).collect()
}

fn inference_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("inference");
    let cells = int_cells(50_000);

    group.bench_function("infer_kind_ints", |b| b.iter(|| infer_kind(black_box(&cells))));
    group.bench_function("series_from_text_ints", |b| {
        b.iter(|| series_from_text("n", black_box(cells.clone()), true))
    });

    let mut csv = String::from("id,name,score,active\n");
    for i in 0..10_000 {
        csv.push_str(&format!("{i},name_{i},{}.5,{}\n", i % 100, i % 2 == 0));
    }
    group.bench_function("read_csv_10k_rows", |b| {
        b.iter(|| read_csv_from_str(black_box(&csv), &CsvReadOptions::default()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, inference_benchmark);
criterion_main!(benches);

//! Benchmarks for the per-frame hot path.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tlview::dataset::Dataset;
use tlview::layout::Viewport;
use tlview::sync::{resolve, TimelineEngine};

/// Forward mapping for a range of view sizes
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for count in [5_usize, 25, 1_000] {
        let distance = (count - 1) as f64 * 780.0;
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| resolve(black_box(distance * 0.37), black_box(distance), count));
        });
    }
    group.finish();
}

/// Full snapshot projection over the bundled dataset
fn bench_snapshot(c: &mut Criterion) {
    let dataset = Dataset::bundled().expect("bundled dataset");
    let mut engine = TimelineEngine::new(dataset, Viewport::new(1440.0, 900.0));
    engine.on_scroll(5000.0);

    c.bench_function("snapshot_bundled", |b| b.iter(|| black_box(engine.snapshot())));
}

/// One spring frame while the desktop filter is catching up
fn bench_spring_frame(c: &mut Criterion) {
    let dataset = Dataset::bundled().expect("bundled dataset");
    c.bench_function("spring_frame", |b| {
        b.iter_batched(
            || {
                let mut engine = TimelineEngine::new(dataset.clone(), Viewport::new(1440.0, 900.0));
                engine.on_scroll(9000.0);
                engine
            },
            |mut engine| black_box(engine.tick(16.0)),
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Filter switch: view rebuild plus layout
fn bench_set_filter(c: &mut Criterion) {
    let dataset = Dataset::bundled().expect("bundled dataset");
    let mut engine = TimelineEngine::new(dataset, Viewport::new(1440.0, 900.0));
    let makers = engine.makers();

    c.bench_function("set_filter_cycle", |b| {
        b.iter(|| {
            for maker in &makers {
                black_box(engine.set_filter(maker));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_snapshot,
    bench_spring_frame,
    bench_set_filter
);
criterion_main!(benches);

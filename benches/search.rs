//! Benchmarks for the lock simulation and duplicate search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use combolock::{
    apply_combination, census, fingerprint, search_range_blocking, Direction, DiskConfiguration,
    SearchOptions, SearchRange, Silent,
};

/// Benchmark applying a long combination from reset.
fn bench_apply_combination(c: &mut Criterion) {
    let moves: Vec<Direction> = Direction::ALL.iter().copied().cycle().take(64).collect();

    c.bench_function("apply_combination_64", |b| {
        b.iter(|| apply_combination(DiskConfiguration::reset(), black_box(&moves)))
    });
}

/// Benchmark fingerprinting a configuration.
fn bench_fingerprint(c: &mut Criterion) {
    let config = DiskConfiguration::after(&[Direction::Up, Direction::Left, Direction::Down]);

    c.bench_function("fingerprint", |b| b.iter(|| fingerprint(black_box(&config))));
}

/// Benchmark a full sweep up to 8 moves, plain and cooperative.
fn bench_search_range(c: &mut Criterion) {
    let target = fingerprint(&DiskConfiguration::after(&[Direction::Up, Direction::Down]));
    let range = SearchRange::from(0..=8);

    let mut group = c.benchmark_group("search_range");
    group.sample_size(10);
    group.bench_function("plain", |b| {
        b.iter(|| {
            search_range_blocking(range, black_box(target), &mut Silent, &SearchOptions::default())
        })
    });
    group.bench_function("cooperative", |b| {
        let options = SearchOptions::default().with_cooperative(true);
        b.iter(|| search_range_blocking(range, black_box(target), &mut Silent, &options))
    });
    group.finish();
}

/// Benchmark tallying every combination up to 7 moves.
fn bench_census(c: &mut Criterion) {
    c.bench_function("census_7", |b| b.iter(|| census(black_box(7))));
}

criterion_group!(
    benches,
    bench_apply_combination,
    bench_fingerprint,
    bench_search_range,
    bench_census
);
criterion_main!(benches);

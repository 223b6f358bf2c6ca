use std::iter::repeat_with;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanfilter::{
    filter::{BigintMultiRange, BigintRange, BigintValues},
    Filter,
};

fn sample_points(count: usize) -> Vec<i64> {
    let mut points: Vec<i64> = repeat_with(|| fastrand::i64(0..10_000_000))
        .take(count)
        .collect();
    points.sort_unstable();
    points.dedup();
    points
}

#[inline(never)]
fn scan(filter: &Filter, samples: &[i64]) -> usize {
    samples
        .iter()
        .filter(|value| filter.test_integer(**value).unwrap_or(false))
        .count()
}

fn discrete_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("discrete_points");
    let samples: Vec<i64> = repeat_with(|| fastrand::i64(0..10_000_000))
        .take(4096)
        .collect();

    for count in [2, 8, 64, 1024] {
        let points = sample_points(count);
        let values = Filter::from(BigintValues::of(points.iter().copied(), false));
        group.bench_with_input(BenchmarkId::new("values", count), &values, |b, filter| {
            b.iter(|| scan(black_box(filter), &samples))
        });

        if points.len() > 1 {
            let ranges = points
                .iter()
                .map(|point| BigintRange::of(*point, *point, false))
                .collect();
            let multi = Filter::from(BigintMultiRange::of(ranges, false));
            group.bench_with_input(BenchmarkId::new("multi_range", count), &multi, |b, filter| {
                b.iter(|| scan(black_box(filter), &samples))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, discrete_points);
criterion_main!(benches);

//! delice benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Annotation scalability (group count and group size)
//! - Test variants (Student, Welch)
//! - Plot kinds end to end (violin, box, bar, faceted)
//! - SVG serialization
//! - Pathological cases (heavy outliers, heteroscedastic groups)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use delice::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// `groups` normal groups of `size` observations with shifted means.
fn generate_groups(groups: usize, size: usize, seed: u64) -> DataFrame<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut labels = Vec::with_capacity(groups * size);
    let mut values = Vec::with_capacity(groups * size);

    for g in 0..groups {
        let dist = Normal::new(g as f64 * 0.3, 1.0).unwrap();
        for _ in 0..size {
            labels.push(format!("group_{g:02}"));
            values.push(dist.sample(&mut rng));
        }
    }

    DataFrame::new()
        .with_categorical("group", labels)
        .unwrap()
        .with_numeric("value", values)
        .unwrap()
}

/// Groups whose spread grows with the group index.
fn generate_heteroscedastic(groups: usize, size: usize, seed: u64) -> DataFrame<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut labels = Vec::with_capacity(groups * size);
    let mut values = Vec::with_capacity(groups * size);

    for g in 0..groups {
        let dist = Normal::new(g as f64 * 0.5, 0.2 + g as f64).unwrap();
        for _ in 0..size {
            labels.push(format!("group_{g:02}"));
            values.push(dist.sample(&mut rng));
        }
    }

    DataFrame::new()
        .with_categorical("group", labels)
        .unwrap()
        .with_numeric("value", values)
        .unwrap()
}

/// Normal groups with 5% of observations replaced by extreme values.
fn generate_outlier_groups(groups: usize, size: usize, seed: u64) -> DataFrame<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let outlier_dist = Uniform::new(-50.0, 50.0).unwrap();
    let frame = generate_groups(groups, size, seed);
    let mut values = frame.numeric("value").unwrap().to_vec();

    for _ in 0..values.len() / 20 {
        let idx = rng.random_range(0..values.len());
        values[idx] = outlier_dist.sample(&mut rng);
    }

    DataFrame::new()
        .with_categorical("group", frame.labels("group").unwrap())
        .unwrap()
        .with_numeric("value", values)
        .unwrap()
}

/// Two groups measured at several time points.
fn generate_faceted(facets: usize, size: usize, seed: u64) -> DataFrame<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lines = Vec::new();
    let mut days = Vec::new();
    let mut values = Vec::new();

    for day in 0..facets {
        for (line, shift) in [("wt", 0.0), ("ko", 0.4)] {
            let dist = Normal::new(day as f64 + shift * day as f64, 0.5).unwrap();
            for _ in 0..size {
                lines.push(line);
                days.push(day as f64);
                values.push(dist.sample(&mut rng));
            }
        }
    }

    DataFrame::new()
        .with_categorical("line", lines)
        .unwrap()
        .with_numeric("day", days)
        .unwrap()
        .with_numeric("size", values)
        .unwrap()
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_group_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_count");
    group.sample_size(50);

    for groups in [2, 4, 8, 16] {
        let frame = generate_groups(groups, 30, 42);
        group.throughput(Throughput::Elements((groups * (groups - 1) / 2) as u64));
        group.bench_with_input(BenchmarkId::new("compare", groups), &groups, |b, _| {
            b.iter(|| {
                Delice::new()
                    .adapter(Compare)
                    .build()
                    .unwrap()
                    .run(black_box(&frame), "group", "value")
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_group_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_size");
    group.sample_size(50);

    for size in [10, 100, 1_000, 10_000] {
        let frame = generate_groups(4, size, 42);
        group.throughput(Throughput::Elements((4 * size) as u64));
        group.bench_with_input(BenchmarkId::new("compare", size), &size, |b, _| {
            b.iter(|| {
                Delice::new()
                    .adapter(Compare)
                    .build()
                    .unwrap()
                    .run(black_box(&frame), "group", "value")
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_tests(c: &mut Criterion) {
    let mut group = c.benchmark_group("tests");
    group.sample_size(100);
    let frame = generate_heteroscedastic(6, 50, 42);

    for test in [TTest::Student, TTest::Welch] {
        group.bench_with_input(BenchmarkId::new("compare", test.name()), &test, |b, &test| {
            b.iter(|| {
                Delice::new()
                    .test(test)
                    .adapter(Compare)
                    .build()
                    .unwrap()
                    .run(black_box(&frame), "group", "value")
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_plots(c: &mut Criterion) {
    let mut group = c.benchmark_group("plots");
    group.sample_size(30);
    let frame = generate_groups(4, 200, 42);

    group.bench_function("violin", |b| {
        b.iter(|| {
            Delice::new()
                .seed(42)
                .adapter(Violin)
                .build()
                .unwrap()
                .plot(black_box(&frame), "group", "value")
                .unwrap()
        })
    });

    group.bench_function("box", |b| {
        b.iter(|| {
            Delice::new()
                .seed(42)
                .significance_bars(true)
                .adapter(BoxPlot)
                .build()
                .unwrap()
                .plot(black_box(&frame), "group", "value")
                .unwrap()
        })
    });

    group.bench_function("bar", |b| {
        b.iter(|| {
            Delice::new()
                .seed(42)
                .adapter(Bar)
                .build()
                .unwrap()
                .plot(black_box(&frame), "group", "value")
                .unwrap()
        })
    });

    let faceted = generate_faceted(5, 20, 42);
    for body in [BodyKind::Box, BodyKind::Violin, BodyKind::Dots] {
        group.bench_with_input(BenchmarkId::new("multi", format!("{body:?}")), &body, |b, &body| {
            b.iter(|| {
                Delice::new()
                    .seed(42)
                    .body(body)
                    .adapter(Multi)
                    .build()
                    .unwrap()
                    .plot(black_box(&faceted), "line", "day", "size")
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("svg");
    group.sample_size(50);

    for size in [50, 500, 5_000] {
        let frame = generate_groups(4, size, 42);
        let plot = Delice::new()
            .seed(42)
            .adapter(Violin)
            .build()
            .unwrap()
            .plot(&frame, "group", "value")
            .unwrap();
        group.bench_with_input(BenchmarkId::new("violin", size), &size, |b, _| {
            b.iter(|| black_box(&plot).to_svg().unwrap())
        });
    }

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(50);

    let outliers = generate_outlier_groups(5, 200, 42);
    group.bench_function("outliers", |b| {
        b.iter(|| {
            Delice::new()
                .seed(42)
                .adapter(Violin)
                .build()
                .unwrap()
                .plot(black_box(&outliers), "group", "value")
                .unwrap()
        })
    });

    let spread = generate_heteroscedastic(5, 200, 42);
    group.bench_function("heteroscedastic", |b| {
        b.iter(|| {
            Delice::new()
                .test(TTest::Welch)
                .seed(42)
                .adapter(Violin)
                .build()
                .unwrap()
                .plot(black_box(&spread), "group", "value")
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_group_count,
    bench_group_size,
    bench_tests,
    bench_plots,
    bench_svg,
    bench_pathological,
);

criterion_main!(benches);

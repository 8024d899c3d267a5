#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for histogram binning and rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use inkframe::prelude::*;

fn sample(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let x = i as f64 / size as f64;
            // Bell-curve-like distribution from a deterministic formula
            (x * std::f64::consts::TAU).sin() * 50.0 + 50.0 + (i % 17) as f64
        })
        .collect()
}

fn binning_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_binning");

    for size in [100, 1_000, 10_000, 100_000] {
        let data = normalize(&sample(size)).expect("sample should normalize");

        for rule in ["auto", "fd", "sturges"] {
            let spec = BinSpec::named(rule).expect("built-in rule");
            group.bench_with_input(BenchmarkId::new(rule, size), &size, |b, _| {
                b.iter(|| {
                    bin_and_normalize(black_box(&data), &spec).expect("binning should succeed")
                });
            });
        }
    }

    group.finish();
}

fn histogram_render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_render");

    for size in [1_000, 100_000] {
        let data = sample(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let (figure, _) = histogram(black_box(&data)).expect("histogram should build");
                figure.to_framebuffer().expect("framebuffer conversion should succeed")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, binning_benchmark, histogram_render_benchmark);
criterion_main!(benches);

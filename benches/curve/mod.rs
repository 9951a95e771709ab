//! Benchmarks for the Bezier refit and clip modes.

use std::hint::black_box;

use bezier_cv::dsp::{bezier, ClipMode};
use criterion::{BenchmarkId, Criterion};

use crate::SHAPES;

pub fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/fit");

    for &k in SHAPES {
        // Fit + evaluate, what a channel does every tick
        group.bench_with_input(BenchmarkId::new("value_at", k), &k, |b, &k| {
            let mut t = 0.0f32;
            b.iter(|| {
                t = (t + 0.001) % 1.0;
                bezier::value_at(black_box(0.2), black_box(0.9), black_box(t), black_box(k))
            })
        });

        group.bench_with_input(BenchmarkId::new("fit_only", k), &k, |b, &k| {
            b.iter(|| bezier::fit(black_box(0.2), black_box(0.9), black_box(k)))
        });
    }

    group.finish();
}

pub fn bench_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/clip");
    let inputs: Vec<f32> = (0..256).map(|i| i as f32 * 0.1 - 12.8).collect();

    for mode in ClipMode::ALL {
        group.bench_with_input(BenchmarkId::new("apply", mode.name()), &mode, |b, &mode| {
            b.iter(|| {
                inputs
                    .iter()
                    .map(|&v| mode.apply(black_box(v), 0.0, 10.0))
                    .sum::<f32>()
            })
        });
    }

    group.finish();
}

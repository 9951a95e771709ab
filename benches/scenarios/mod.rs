//! Realistic tick workloads: single channels and whole modules.

use std::hint::black_box;

use bezier_cv::{
    io::{Fixed, NullSink},
    module::{Module, MultiModule, SingleModule},
    CurveChannel, ModuleConfig, StepChannel,
};
use criterion::{BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use crate::SHAPES;

pub fn bench_channels(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/channel");

    for &k in SHAPES {
        let mut channel =
            CurveChannel::with_rng(ModuleConfig::default(), NullSink, StdRng::seed_from_u64(1), 0);
        let mut now = 0u32;
        group.bench_with_input(BenchmarkId::new("curve_tick", k), &k, |b, &k| {
            b.iter(|| {
                now = now.wrapping_add(5);
                channel.tick(black_box(now), 2.0, k)
            })
        });
    }

    let mut step =
        StepChannel::with_rng(ModuleConfig::default(), NullSink, StdRng::seed_from_u64(2), 0);
    let mut now = 0u32;
    group.bench_function("step_tick", |b| {
        b.iter(|| {
            now = now.wrapping_add(5);
            step.tick(black_box(now), 2.0)
        })
    });

    group.finish();
}

pub fn bench_modules(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/module");

    let mut single =
        SingleModule::with_seed(None, Fixed(0.7), Fixed(0.3), NullSink, 3, 0);
    let mut now = 0u32;
    group.bench_function("single_tick", |b| {
        b.iter(|| {
            now = now.wrapping_add(5);
            single.tick(black_box(now));
        })
    });

    let mut multi: MultiModule<Fixed, NullSink> =
        MultiModule::with_seed(None, [Fixed(0.4), Fixed(0.9)], [NullSink; 6], 4, 0);
    let mut now = 0u32;
    group.bench_function("multi_tick", |b| {
        b.iter(|| {
            now = now.wrapping_add(5);
            multi.tick(black_box(now));
        })
    });

    group.finish();
}

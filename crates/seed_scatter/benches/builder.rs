mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use seed_scatter::prelude::*;

fn builder_gradient_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder/gradient");

    for &peak in &common::GRADIENT_PEAKS {
        let (config, density) = common::gradient_setup(peak);
        let Ok(builder) = SeedSetBuilder::try_new(config, &density) else {
            continue;
        };
        let expected = builder.build().map(|s| s.len()).unwrap_or(0);
        group.throughput(common::elements_throughput(expected));

        group.bench_with_input(BenchmarkId::from_parameter(peak), &peak, |b, _| {
            b.iter(|| {
                let set = builder.build();
                black_box(set.map(|s| s.len()).unwrap_or(0));
            });
        });
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn builder_parallel_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder/parallel");

    for &peak in &common::GRADIENT_PEAKS {
        let (config, density) = common::gradient_setup(peak);
        let Ok(builder) = SeedSetBuilder::try_new(config, &density) else {
            continue;
        };
        let expected = builder.build_parallel().map(|s| s.len()).unwrap_or(0);
        group.throughput(common::elements_throughput(expected));

        group.bench_with_input(BenchmarkId::from_parameter(peak), &peak, |b, _| {
            b.iter(|| {
                let set = builder.build_parallel();
                black_box(set.map(|s| s.len()).unwrap_or(0));
            });
        });
    }

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn builder_parallel_benches(_c: &mut Criterion) {}

fn builder_events_benches(c: &mut Criterion) {
    let (config, density) = common::gradient_setup(1000.0);
    let Ok(builder) = SeedSetBuilder::try_new(config, &density) else {
        return;
    };
    let mut sink = VecSink::only([SeedEventKind::TileFinished]);

    c.bench_function("builder/events", |b| {
        b.iter(|| {
            sink.clear();
            let set = builder.build_with_events(&mut sink);
            black_box(set.map(|s| s.len()).unwrap_or(0));
        });
    });
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = builder_gradient_benches, builder_parallel_benches, builder_events_benches
}
criterion_main!(benches);

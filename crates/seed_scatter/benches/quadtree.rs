mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_scatter::prelude::*;

fn quadtree_tile_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree/tile");
    let tile = Tile::new(TileId(0, 0), 2.0);

    for &peak in &common::GRADIENT_PEAKS {
        let density = LinearGradientDensity::along_x(2.0, peak);
        let sampler = QuadtreeSampler::new(&density, 17);
        let mut out = Vec::new();
        let expected = sampler.sample_tile(&tile, &mut out).map(|s| s.points).unwrap_or(0);
        group.throughput(common::elements_throughput(expected));

        group.bench_with_input(BenchmarkId::from_parameter(peak), &peak, |b, _| {
            b.iter(|| {
                out.clear();
                let stats = sampler.sample_tile(&tile, &mut out);
                black_box(stats.map(|s| s.points).unwrap_or(0));
            });
        });
    }

    group.finish();
}

fn quadtree_recursive_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree/recursive");
    let extent = DVec2::new(2.0, 2.0);

    for &peak in &common::GRADIENT_PEAKS {
        let density = LinearGradientDensity::along_x(2.0, peak);
        let sampler = RecursiveSampler::new(&density);
        let mut rng_est = StdRng::seed_from_u64(0xA11CE ^ peak as u64);
        let expected = sampler
            .sample_domain(extent, 2.0, &mut rng_est)
            .map(|p| p.len())
            .unwrap_or(0);
        group.throughput(common::elements_throughput(expected));

        let mut rng = StdRng::seed_from_u64(0xC0FFEE ^ peak as u64);
        group.bench_with_input(BenchmarkId::from_parameter(peak), &peak, |b, _| {
            b.iter(|| {
                let pts = sampler.sample_domain(extent, 2.0, &mut rng);
                black_box(pts.map(|p| p.len()).unwrap_or(0));
            });
        });
    }

    group.finish();
}

fn quadtree_leaf_benches(c: &mut Criterion) {
    let density = ConstantDensity(2.5);
    let tile = Tile::new(TileId(3, 5), 1.0);
    let sampler = QuadtreeSampler::new(&density, 99);
    let mut out = Vec::with_capacity(4);

    c.bench_function("quadtree/leaf", |b| {
        b.iter(|| {
            out.clear();
            black_box(sampler.sample_leaf(&tile, Cell::ROOT, black_box(2.5), &mut out));
        });
    });
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = quadtree_tile_benches, quadtree_recursive_benches, quadtree_leaf_benches
}
criterion_main!(benches);

//! Criterion micro-benchmarks for spatial index operations.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use warfront_bench::populated_index;
use warfront_core::FactionId;
use warfront_spatial::{SpatialConfig, SpatialIndex};
use warfront_test_utils::{jitter_units, scatter_units, test_rng};

/// Benchmark: Insert 2K units into an empty index.
fn bench_insert_2k(c: &mut Criterion) {
    let units = scatter_units(1, 2000, 256.0, 256.0);

    c.bench_function("insert_2k", |b| {
        b.iter_batched(
            || SpatialIndex::new(SpatialConfig::default()).unwrap(),
            |mut index| {
                for unit in &units {
                    index.insert(unit).unwrap();
                }
                black_box(index.len());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: One tick of movement updates for 2K units.
///
/// Most moves stay inside their cell, so this mostly measures the
/// unchanged-cells fast path.
fn bench_update_tick_2k(c: &mut Criterion) {
    let (mut index, mut units) = populated_index(2, 2000, 256.0, 256.0).unwrap();
    let mut rng = test_rng(3);

    c.bench_function("update_tick_2k", |b| {
        b.iter(|| {
            jitter_units(&mut rng, &mut units, 0.3, 256.0, 256.0);
            for unit in &units {
                index.update(unit).unwrap();
            }
        });
    });
}

/// Benchmark: 1K radius-8 queries reusing one output buffer.
fn bench_query_r8_1k(c: &mut Criterion) {
    let (index, units) = populated_index(4, 2000, 256.0, 256.0).unwrap();
    let probes: Vec<(f32, f32)> = units.iter().take(1000).map(|u| (u.x, u.y)).collect();
    let mut out = Vec::new();

    c.bench_function("query_r8_1k", |b| {
        b.iter(|| {
            for &(x, y) in &probes {
                index.query_into(x, y, 8.0, &mut out);
                black_box(out.len());
            }
        });
    });
}

/// Benchmark: 1K enemy nearest-target searches.
fn bench_find_nearest_enemy_1k(c: &mut Criterion) {
    let (index, units) = populated_index(5, 2000, 256.0, 256.0).unwrap();
    let probes: Vec<_> = units.iter().take(1000).map(|u| (u.x, u.y, u.faction)).collect();

    c.bench_function("find_nearest_enemy_1k", |b| {
        b.iter(|| {
            for &(x, y, faction) in &probes {
                let hit = index.find_nearest(x, y, 12.0, |r| faction.is_hostile_to(r.faction));
                black_box(hit);
            }
        });
    });
}

/// Benchmark: 500 raycasts of length ~20 through a crowd.
fn bench_raycast_500(c: &mut Criterion) {
    let (index, units) = populated_index(6, 2000, 128.0, 128.0).unwrap();
    let rays: Vec<_> = units
        .iter()
        .take(500)
        .map(|u| (u.x, u.y, (u.x + 14.0).min(127.0), (u.y + 14.0).min(127.0)))
        .collect();
    let red = FactionId(1);

    c.bench_function("raycast_500", |b| {
        b.iter(|| {
            for &(x1, y1, x2, y2) in &rays {
                black_box(index.raycast(x1, y1, x2, y2, |r| red.is_hostile_to(r.faction)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_insert_2k,
    bench_update_tick_2k,
    bench_query_r8_1k,
    bench_find_nearest_enemy_1k,
    bench_raycast_500
);
criterion_main!(benches);

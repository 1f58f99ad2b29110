// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pinn_geometry::geometry::{Difference, Geometry, Hypercube, Hypersphere, Intersection, Union};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn disk(x: f64, r: f64) -> Arc<dyn Geometry> {
    Arc::new(Hypersphere::disk([x, 0.0], r).unwrap())
}

fn square() -> Arc<dyn Geometry> {
    Arc::new(Hypercube::rectangle([-1.0, -1.0], [1.0, 1.0]).unwrap())
}

fn composites() -> Vec<(&'static str, Box<dyn Geometry>)> {
    let mut rng = StdRng::seed_from_u64(0);
    let union: Box<dyn Geometry> =
        Box::new(Union::with_rng(disk(0.0, 1.0), disk(1.5, 1.0), &mut rng).unwrap());
    let difference: Box<dyn Geometry> = Box::new(Difference::new(square(), disk(0.0, 0.5)).unwrap());
    let intersection: Box<dyn Geometry> =
        Box::new(Intersection::new(square(), disk(1.0, 1.0)).unwrap());
    vec![
        ("union", union),
        ("difference", difference),
        ("intersection", intersection),
    ]
}

fn bench_interior(c: &mut Criterion) {
    let mut group = c.benchmark_group("interior");

    for (name, geom) in composites() {
        for n in [100, 10_000] {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
                let mut rng = StdRng::seed_from_u64(1);
                b.iter(|| geom.random_points(black_box(n), &mut rng).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary");

    for (name, geom) in composites() {
        for n in [100, 10_000] {
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, &n| {
                let mut rng = StdRng::seed_from_u64(2);
                b.iter(|| geom.random_boundary_points(black_box(n), &mut rng).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let mut rng = StdRng::seed_from_u64(3);
    let probe = square().random_points(10_000, &mut rng).unwrap();

    for (name, geom) in composites() {
        group.bench_function(format!("{}_is_inside", name), |b| {
            b.iter(|| geom.is_inside(black_box(&probe)))
        });
        group.bench_function(format!("{}_sdf", name), |b| {
            b.iter(|| geom.sdf_func(black_box(&probe)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interior, bench_boundary, bench_queries);
criterion_main!(benches);

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end scenarios over disks and boxes

use pinn_geometry::geometry::{
    Difference, Geometry, Hypercube, Hypersphere, Intersection, Points, Union,
};
use pinn_geometry::GeometryError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn disk(x: f64, y: f64, r: f64) -> Arc<dyn Geometry> {
    Arc::new(Hypersphere::disk([x, y], r).unwrap())
}

#[test]
fn test_union_of_two_disks() {
    let a = disk(0.0, 0.0, 1.0);
    let b = disk(1.5, 0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(10);
    let union = Union::with_rng(a.clone(), b.clone(), &mut rng).unwrap();

    let points = union.random_points(500, &mut rng).unwrap();
    assert_eq!(points.nrows(), 500);

    let in_a = a.is_inside(&points);
    let in_b = b.is_inside(&points);
    assert!(in_a.iter().zip(&in_b).all(|(x, y)| *x || *y));
    // both lobes get hit
    assert!(in_a.iter().any(|x| *x) && in_b.iter().any(|x| *x));
}

#[test]
fn test_disjoint_intersection_fails_fast() {
    // bounding boxes do not even overlap
    let empty = Intersection::new(disk(0.0, 0.0, 1.0), disk(3.0, 0.0, 1.0)).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let start = Instant::now();
    let err = empty.random_points(10, &mut rng).unwrap_err();
    assert!(matches!(err, GeometryError::EmptyRegion { .. }));
    let err = empty.random_boundary_points(10, &mut rng).unwrap_err();
    assert!(matches!(err, GeometryError::EmptyRegion { .. }));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_disjoint_intersection_with_overlapping_boxes_is_bounded() {
    // boxes overlap in the corner square, the disks do not
    let empty = Intersection::new(disk(0.0, 0.0, 1.0), disk(1.6, 1.6, 1.0))
        .unwrap()
        .with_max_iterations(50);
    let mut rng = StdRng::seed_from_u64(12);

    match empty.random_points(10, &mut rng).unwrap_err() {
        GeometryError::SamplingExhausted {
            requested,
            collected,
            iterations,
            ..
        } => {
            assert_eq!(requested, 10);
            assert_eq!(collected, 0);
            assert_eq!(iterations, 50);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_annulus() {
    let outer = disk(0.0, 0.0, 1.0);
    let inner = disk(0.0, 0.0, 0.5);
    let annulus = Difference::new(outer.clone(), inner.clone()).unwrap();

    let expected = PI - PI * 0.25;
    assert_eq!(
        annulus.area(),
        Some(outer.area().unwrap() - inner.area().unwrap())
    );
    approx::assert_relative_eq!(annulus.area().unwrap(), expected, epsilon = 1e-12);

    // radii 0.1, 0.3, 0.49 | 0.51, 0.75, 0.99
    let radii = [0.1, 0.3, 0.49, 0.51, 0.75, 0.99];
    let mut coords = Vec::new();
    for (k, r) in radii.iter().enumerate() {
        let angle = k as f64 * 0.9;
        coords.push(r * angle.cos());
        coords.push(r * angle.sin());
    }
    let points = Points::from_row_slice(radii.len(), 2, &coords);
    assert_eq!(
        annulus.is_inside(&points),
        vec![false, false, false, true, true, true]
    );
}

#[test]
fn test_annulus_boundary_normals() {
    let annulus = Difference::new(disk(0.0, 0.0, 1.0), disk(0.0, 0.0, 0.5)).unwrap();
    let points = Points::from_row_slice(2, 2, &[1.0, 0.0, 0.5, 0.0]);

    assert_eq!(annulus.on_boundary(&points), vec![true, true]);
    let normals = annulus.boundary_normal(&points);
    // outer rim points away from the hole, inner rim points into it
    approx::assert_relative_eq!(normals[(0, 0)], 1.0, epsilon = 1e-12);
    approx::assert_relative_eq!(normals[(1, 0)], -1.0, epsilon = 1e-12);
}

#[test]
fn test_nested_composites() {
    // plate minus a hole, unioned with a tab, intersected with a window
    let mut rng = StdRng::seed_from_u64(13);
    let plate: Arc<dyn Geometry> = Arc::new(Hypercube::rectangle([0.0, 0.0], [4.0, 2.0]).unwrap());
    let tab: Arc<dyn Geometry> = Arc::new(Hypercube::rectangle([4.0, 0.5], [5.0, 1.5]).unwrap());
    let window: Arc<dyn Geometry> =
        Arc::new(Hypercube::rectangle([1.0, -1.0], [4.5, 3.0]).unwrap());

    let holed: Arc<dyn Geometry> = Arc::new(Difference::new(plate, disk(2.0, 1.0, 0.5)).unwrap());
    let body: Arc<dyn Geometry> = Arc::new(Union::with_rng(holed, tab, &mut rng).unwrap());
    let clipped = Intersection::new(body, window).unwrap();

    let points = clipped.random_points(300, &mut rng).unwrap();
    for row in points.row_iter() {
        let (x, y) = (row[0], row[1]);
        assert!((1.0..=4.5).contains(&x));
        assert!((x - 2.0).powi(2) + (y - 1.0).powi(2) >= 0.25 - 1e-12);
    }

    let boundary = clipped.random_boundary_points(100, &mut rng).unwrap();
    assert!(clipped.on_boundary(&boundary).into_iter().all(|b| b));
}

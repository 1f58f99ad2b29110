// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rejection sampling to an exact count, plus interior/boundary batch helpers

use super::point_utils::{filter_rows, row_vec, PointBuffer};
use super::{Geometry, Points};
use crate::error::{GeometryError, Result};
use rand::RngCore;

/// Iteration budget used when the caller does not configure one
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Row filter applied on top of a geometry's own membership test
pub type Criteria<'a> = &'a dyn Fn(&[f64]) -> bool;

/// Call `draw` until `n` accepted rows are collected or the budget runs out.
///
/// Each call returns a batch of already-accepted candidates; surplus rows of
/// the final batch are dropped.
pub fn accumulate<F>(
    n: usize,
    ndim: usize,
    max_iterations: usize,
    kind: &'static str,
    mut draw: F,
) -> Result<Points>
where
    F: FnMut() -> Result<Points>,
{
    let mut buffer = PointBuffer::with_capacity(n, ndim);
    let mut iterations = 0;
    while buffer.len() < n {
        if iterations >= max_iterations {
            return Err(GeometryError::SamplingExhausted {
                kind,
                requested: n,
                collected: buffer.len(),
                iterations,
            });
        }
        iterations += 1;
        let accepted = draw()?;
        let remaining = n - buffer.len();
        buffer.push_rows(&accepted, remaining);
    }
    Ok(buffer.into_points())
}

/// Interior collocation points with their distance to the boundary
#[derive(Debug, Clone)]
pub struct InteriorSample {
    pub points: Points,
    /// Negated signed distance: positive inside, zero on the boundary
    pub distance: Vec<f64>,
}

/// Boundary collocation points with outward normals
#[derive(Debug, Clone)]
pub struct BoundarySample {
    pub points: Points,
    pub normals: Points,
}

/// Draw `n` interior points, optionally restricted by `criteria`
pub fn sample_interior(
    geom: &dyn Geometry,
    n: usize,
    criteria: Option<Criteria<'_>>,
    max_iterations: usize,
    rng: &mut dyn RngCore,
) -> Result<InteriorSample> {
    let points = match criteria {
        None => geom.random_points(n, rng)?,
        Some(keep) => accumulate(n, geom.ndim(), max_iterations, "interior", || {
            let candidates = geom.random_points(n, rng)?;
            Ok(filter_rows(&candidates, &apply(&candidates, keep)))
        })?,
    };
    let distance = geom.sdf_func(&points).into_iter().map(|d| -d).collect();
    Ok(InteriorSample { points, distance })
}

/// Draw `n` boundary points, optionally restricted by `criteria`
pub fn sample_boundary(
    geom: &dyn Geometry,
    n: usize,
    criteria: Option<Criteria<'_>>,
    max_iterations: usize,
    rng: &mut dyn RngCore,
) -> Result<BoundarySample> {
    let points = match criteria {
        None => geom.random_boundary_points(n, rng)?,
        Some(keep) => accumulate(n, geom.ndim(), max_iterations, "boundary", || {
            let candidates = geom.random_boundary_points(n, rng)?;
            Ok(filter_rows(&candidates, &apply(&candidates, keep)))
        })?,
    };
    let normals = geom.boundary_normal(&points);
    Ok(BoundarySample { points, normals })
}

fn apply(points: &Points, keep: Criteria<'_>) -> Vec<bool> {
    (0..points.nrows()).map(|i| keep(&row_vec(points, i))).collect()
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! The query interface shared by primitives and CSG composites

use super::{BoundingBox, Points};
use crate::error::Result;
use rand::RngCore;
use std::fmt::Debug;

/// A region of space that can be queried and sampled in bulk.
///
/// Every batch argument is an `n × ndim` matrix with one point per row.
/// Masks, distances and normals come back in the same row order.
///
/// The infallible queries (`is_inside`, `on_boundary`, `boundary_normal`,
/// `sdf_func`) panic in debug builds when a batch has the wrong number of
/// columns; `periodic_point` reports it as an error instead.
pub trait Geometry: Debug + Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    fn ndim(&self) -> usize;

    fn bbox(&self) -> &BoundingBox;

    /// Upper bound on the distance between any two points of the region
    fn diam(&self) -> f64;

    /// Measure of the region (length, area or volume), when known
    fn area(&self) -> Option<f64>;

    /// Measure of the boundary, when known
    fn perimeter(&self) -> Option<f64>;

    /// Closed membership test
    fn is_inside(&self, points: &Points) -> Vec<bool>;

    fn on_boundary(&self, points: &Points) -> Vec<bool>;

    /// Unit outward normals; rows off the boundary are unspecified
    fn boundary_normal(&self, points: &Points) -> Points;

    /// Exactly `n` points drawn from the interior
    fn random_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points>;

    /// Exactly `n` points drawn from the boundary
    fn random_boundary_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points>;

    /// Map boundary points along `component` onto the opposite periodic face
    fn periodic_point(&self, points: &Points, component: usize) -> Result<Points>;

    /// Signed distance, negative inside
    fn sdf_func(&self, points: &Points) -> Vec<f64>;

    /// Check the approximations this node relies on. Primitives have none.
    fn validate(&self, _samples: usize, _rng: &mut dyn RngCore) -> Result<Vec<AssumptionWarning>> {
        Ok(Vec::new())
    }
}

/// An approximation found not to hold for a composite
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssumptionWarning {
    /// Which node raised the warning
    pub node: String,
    pub kind: AssumptionKind,
    /// Fraction of probe samples violating the assumption
    pub fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AssumptionKind {
    /// Union operands overlap, so the summed area overestimates
    OverlappingUnion,
    /// Difference subtrahend is not contained in the minuend
    UncontainedSubtrahend,
    /// Both boundary clauses hold at the same points, normals get summed
    OverlappingNormals,
}

impl AssumptionKind {
    pub fn describe(&self) -> &'static str {
        match self {
            AssumptionKind::OverlappingUnion => "union operands overlap; area is overestimated",
            AssumptionKind::UncontainedSubtrahend => {
                "subtracted geometry leaves the minuend; area is underestimated"
            }
            AssumptionKind::OverlappingNormals => {
                "both operands claim the same boundary points; normals are summed"
            }
        }
    }
}

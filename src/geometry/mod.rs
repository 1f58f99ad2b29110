// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - primitives, CSG composition and point sampling

mod analytics;
mod base;
mod bbox;
mod boolean;
mod csg;
pub mod point_utils;
mod primitives;
pub mod sampling;

/// A batch of points, one per row
pub type Points = nalgebra::DMatrix<f64>;

pub use analytics::{analyze, validate, GeometryStats, ValidationReport};
pub use base::{AssumptionKind, AssumptionWarning, Geometry};
pub use bbox::BoundingBox;
pub use boolean::{difference, intersection, union, BooleanOp};
pub use csg::{Difference, Intersection, Union, PERIMETER_SAMPLES};
pub use primitives::{Hypercube, Hypersphere};
pub use sampling::{
    sample_boundary, sample_interior, BoundarySample, Criteria, InteriorSample,
    DEFAULT_MAX_ITERATIONS,
};

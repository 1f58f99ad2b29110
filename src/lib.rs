// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! PINN Geometry
//!
//! Constructive solid geometry for collocation-point sampling.
//! Primitives combine through union, difference and intersection into
//! composites that answer membership, boundary, normal and SDF queries in
//! bulk and draw exact-size interior and boundary point batches.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod sampler;
pub mod scene;
pub mod utils;

pub use config::SamplingConfig;
pub use error::GeometryError;
pub use geometry::{
    BooleanOp, BoundingBox, Difference, Geometry, Hypercube, Hypersphere, Intersection, Points,
    Union,
};
pub use sampler::Sampler;
pub use scene::{import_scene_file, parse_scene, Evaluator, Node, NodeKind};

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Build the geometry described by a JSON scene string
pub fn load_geometry(source: &str, sampler: &mut Sampler) -> Result<Arc<dyn Geometry>> {
    let scene = parse_scene(source)?;
    let evaluator = Evaluator::with_config(sampler.config());
    evaluator.evaluate(&scene, sampler.rng())
}

/// Build the geometry described by a JSON scene file
pub fn load_geometry_file(
    path: impl AsRef<Path>,
    sampler: &mut Sampler,
) -> Result<Arc<dyn Geometry>> {
    let scene = import_scene_file(path)?;
    let evaluator = Evaluator::with_config(sampler.config());
    evaluator.evaluate(&scene, sampler.rng())
}

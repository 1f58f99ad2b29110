// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sampler API: a seeded generator plus configuration driving geometry queries

use crate::config::SamplingConfig;
use crate::geometry::{
    analyze, sample_boundary, sample_interior, validate, BoundarySample, Criteria, Geometry,
    GeometryStats, InteriorSample, ValidationReport,
};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Owns the RNG so repeated draws from one seed are reproducible
pub struct Sampler {
    config: SamplingConfig,
    rng: StdRng,
}

impl Sampler {
    pub fn new(config: SamplingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Generator shared with scene evaluation and direct geometry calls
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Interior points with their distance to the boundary
    pub fn interior(&mut self, geom: &dyn Geometry, n: usize) -> Result<InteriorSample> {
        self.interior_where(geom, n, None)
    }

    pub fn interior_where(
        &mut self,
        geom: &dyn Geometry,
        n: usize,
        criteria: Option<Criteria<'_>>,
    ) -> Result<InteriorSample> {
        sample_interior(geom, n, criteria, self.config.max_iterations, &mut self.rng)
            .with_context(|| format!("Failed to sample {} interior points from {}", n, geom.name()))
    }

    /// Boundary points with outward normals
    pub fn boundary(&mut self, geom: &dyn Geometry, n: usize) -> Result<BoundarySample> {
        self.boundary_where(geom, n, None)
    }

    pub fn boundary_where(
        &mut self,
        geom: &dyn Geometry,
        n: usize,
        criteria: Option<Criteria<'_>>,
    ) -> Result<BoundarySample> {
        sample_boundary(geom, n, criteria, self.config.max_iterations, &mut self.rng)
            .with_context(|| format!("Failed to sample {} boundary points from {}", n, geom.name()))
    }

    pub fn stats(&mut self, geom: &dyn Geometry) -> GeometryStats {
        analyze(geom, self.config.stats_samples, &mut self.rng)
    }

    pub fn validate(&mut self, geom: &dyn Geometry) -> Result<ValidationReport> {
        validate(geom, self.config.validation_samples, &mut self.rng)
            .with_context(|| format!("Failed to validate {}", geom.name()))
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Hypercube, Hypersphere, Intersection};
    use std::sync::Arc;

    fn seeded(seed: u64) -> Sampler {
        Sampler::new(SamplingConfig {
            seed: Some(seed),
            ..SamplingConfig::default()
        })
    }

    #[test]
    fn test_same_seed_same_points() {
        let disk = Hypersphere::disk([0.0, 0.0], 1.0).unwrap();
        let a = seeded(9).interior(&disk, 50).unwrap();
        let b = seeded(9).interior(&disk, 50).unwrap();
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn test_boundary_sample_shapes() {
        let cube = Hypercube::cuboid([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let sample = seeded(1).boundary(&cube, 20).unwrap();
        assert_eq!(sample.points.shape(), (20, 3));
        assert_eq!(sample.normals.shape(), (20, 3));
    }

    #[test]
    fn test_failure_carries_context() {
        let empty = Intersection::new(
            Arc::new(Hypersphere::disk([0.0, 0.0], 1.0).unwrap()),
            Arc::new(Hypersphere::disk([5.0, 0.0], 1.0).unwrap()),
        )
        .unwrap();
        let err = seeded(2).interior(&empty, 10).unwrap_err();
        assert!(format!("{:#}", err).contains("empty region"));
    }
}

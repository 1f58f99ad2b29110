// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and assumption checks

use super::base::AssumptionWarning;
use super::Geometry;
use crate::error::Result;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Root node name
    pub name: String,
    pub ndim: usize,
    pub bbox_min: Vec<f64>,
    pub bbox_max: Vec<f64>,
    pub diam: f64,
    /// Declared measure, exact for primitives and approximate for composites
    pub area: Option<f64>,
    /// Declared boundary measure
    pub perimeter: Option<f64>,
    /// Bounding-box Monte-Carlo estimate of the measure
    pub estimated_area: f64,
    /// Number of probe points behind `estimated_area`
    pub samples: usize,
}

impl GeometryStats {
    /// Relative gap between declared and estimated measure
    pub fn area_error(&self) -> Option<f64> {
        let area = self.area?;
        if self.estimated_area == 0.0 {
            return None;
        }
        Some(((area - self.estimated_area) / self.estimated_area).abs())
    }
}

/// Compute statistics for a geometry, probing its bbox with `samples` points
pub fn analyze(geom: &dyn Geometry, samples: usize, rng: &mut dyn RngCore) -> GeometryStats {
    let bbox = geom.bbox();
    let estimated_area = if bbox.is_empty() || samples == 0 {
        0.0
    } else {
        let probe = bbox.sample_uniform(samples, rng);
        let hits = geom.is_inside(&probe).into_iter().filter(|&b| b).count();
        bbox.volume() * hits as f64 / samples as f64
    };

    GeometryStats {
        name: geom.name().to_string(),
        ndim: geom.ndim(),
        bbox_min: bbox.min.iter().copied().collect(),
        bbox_max: bbox.max.iter().copied().collect(),
        diam: geom.diam(),
        area: geom.area(),
        perimeter: geom.perimeter(),
        estimated_area,
        samples,
    }
}

/// Outcome of checking every approximation in a geometry tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub samples: usize,
    pub warnings: Vec<AssumptionWarning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Probe the composites of `geom` for violated approximations
pub fn validate(geom: &dyn Geometry, samples: usize, rng: &mut dyn RngCore) -> Result<ValidationReport> {
    Ok(ValidationReport {
        samples,
        warnings: geom.validate(samples, rng)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Difference, Hypercube, Hypersphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;
    use std::sync::Arc;

    #[test]
    fn test_analyze_rectangle() {
        let rect = Hypercube::rectangle([0.0, 0.0], [2.0, 1.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let stats = analyze(&rect, 1000, &mut rng);
        assert_eq!(stats.ndim, 2);
        assert_eq!(stats.bbox_max, vec![2.0, 1.0]);
        assert_eq!(stats.area, Some(2.0));
        // every probe lands inside a box
        assert_eq!(stats.estimated_area, 2.0);
        assert_eq!(stats.area_error(), Some(0.0));
    }

    #[test]
    fn test_analyze_annulus() {
        let annulus = Difference::new(
            Arc::new(Hypersphere::disk([0.0, 0.0], 1.0).unwrap()),
            Arc::new(Hypersphere::disk([0.0, 0.0], 0.5).unwrap()),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let stats = analyze(&annulus, 20_000, &mut rng);
        let expected = 0.75 * PI;
        assert!((stats.area.unwrap() - expected).abs() < 1e-12);
        assert!(
            (stats.estimated_area - expected).abs() < 0.1,
            "estimate {} vs {}",
            stats.estimated_area,
            expected
        );
    }

    #[test]
    fn test_validate_primitive_is_clean() {
        let disk = Hypersphere::disk([0.0, 0.0], 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let report = validate(&disk, 100, &mut rng).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.samples, 100);
    }
}

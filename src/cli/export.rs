// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON export of sampled collocation points

use crate::geometry::{BoundarySample, InteriorSample, Points};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interior rows with distance to the boundary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteriorRows {
    pub points: Vec<Vec<f64>>,
    pub distance: Vec<f64>,
}

/// Boundary rows with outward normals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoundaryRows {
    pub points: Vec<Vec<f64>>,
    pub normals: Vec<Vec<f64>>,
}

/// Everything one `sample` run produces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSet {
    pub ndim: usize,
    pub interior: InteriorRows,
    pub boundary: BoundaryRows,
}

impl SampleSet {
    pub fn new(ndim: usize, interior: &InteriorSample, boundary: &BoundarySample) -> Self {
        Self {
            ndim,
            interior: InteriorRows {
                points: to_rows(&interior.points),
                distance: interior.distance.clone(),
            },
            boundary: BoundaryRows {
                points: to_rows(&boundary.points),
                normals: to_rows(&boundary.normals),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize samples")
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write samples: {}", path.display()))
    }
}

fn to_rows(points: &Points) -> Vec<Vec<f64>> {
    points
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}

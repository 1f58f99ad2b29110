// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::Points;
use crate::error::{GeometryError, Result};
use nalgebra::DVector;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of arbitrary dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: DVector<f64>,
    pub max: DVector<f64>,
}

impl BoundingBox {
    pub fn new(min: DVector<f64>, max: DVector<f64>) -> Result<Self> {
        if min.len() != max.len() {
            return Err(GeometryError::InvalidInput(format!(
                "bounding box corners have {} and {} coordinates",
                min.len(),
                max.len()
            )));
        }
        Ok(Self { min, max })
    }

    pub fn from_slices(min: &[f64], max: &[f64]) -> Result<Self> {
        Self::new(DVector::from_column_slice(min), DVector::from_column_slice(max))
    }

    pub fn ndim(&self) -> usize {
        self.min.len()
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        Self {
            min: self.min.zip_map(&other.min, f64::min),
            max: self.max.zip_map(&other.max, f64::max),
        }
    }

    /// Overlap of both boxes; inverted when they are disjoint
    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        Self {
            min: self.min.zip_map(&other.min, f64::max),
            max: self.max.zip_map(&other.max, f64::min),
        }
    }

    /// True when some axis has `min > max`
    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(self.max.iter()).any(|(lo, hi)| lo > hi)
    }

    pub fn center(&self) -> DVector<f64> {
        (&self.min + &self.max) / 2.0
    }

    pub fn size(&self) -> DVector<f64> {
        &self.max - &self.min
    }

    /// Product of side lengths, zero for an empty box
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.size().iter().product()
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point
            .iter()
            .enumerate()
            .all(|(i, &x)| self.min[i] <= x && x <= self.max[i])
    }

    /// Draw `n` points uniformly inside the box
    pub fn sample_uniform(&self, n: usize, rng: &mut dyn RngCore) -> Points {
        let size = self.size();
        Points::from_fn(n, self.ndim(), |_, j| {
            self.min[j] + rng.gen::<f64>() * size[j]
        })
    }
}

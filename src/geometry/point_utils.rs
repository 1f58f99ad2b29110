// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Row-wise helpers for point batches

use super::Points;
use crate::error::{GeometryError, Result};
use rand::seq::SliceRandom;
use rand::RngCore;

/// Row-major accumulator used while collecting accepted samples
#[derive(Debug, Clone)]
pub struct PointBuffer {
    ndim: usize,
    data: Vec<f64>,
}

impl PointBuffer {
    pub fn with_capacity(rows: usize, ndim: usize) -> Self {
        Self {
            ndim,
            data: Vec::with_capacity(rows * ndim),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.ndim.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append at most `limit` leading rows of `points`, returning how many were taken
    pub fn push_rows(&mut self, points: &Points, limit: usize) -> usize {
        let taken = points.nrows().min(limit);
        for i in 0..taken {
            self.data.extend(points.row(i).iter());
        }
        taken
    }

    pub fn into_points(self) -> Points {
        Points::from_row_slice(self.len(), self.ndim, &self.data)
    }
}

/// Copy a single row into a plain vector
pub fn row_vec(points: &Points, i: usize) -> Vec<f64> {
    points.row(i).iter().copied().collect()
}

/// Keep the rows whose mask entry is true
pub fn filter_rows(points: &Points, mask: &[bool]) -> Points {
    let mut buffer = PointBuffer::with_capacity(points.nrows(), points.ncols());
    for (i, _) in mask.iter().enumerate().filter(|(_, &keep)| keep) {
        buffer.data.extend(points.row(i).iter());
    }
    buffer.into_points()
}

/// Stack `b` under `a`
pub fn concat_rows(a: &Points, b: &Points) -> Points {
    let mut buffer = PointBuffer::with_capacity(a.nrows() + b.nrows(), a.ncols());
    buffer.push_rows(a, a.nrows());
    buffer.push_rows(b, b.nrows());
    buffer.into_points()
}

/// Random permutation of the rows
pub fn shuffle_rows(points: &Points, rng: &mut dyn RngCore) -> Points {
    let mut order: Vec<usize> = (0..points.nrows()).collect();
    order.shuffle(rng);
    let mut buffer = PointBuffer::with_capacity(points.nrows(), points.ncols());
    for i in order {
        buffer.data.extend(points.row(i).iter());
    }
    buffer.into_points()
}

/// Take rows from `replacement` where `mask` holds, from `base` elsewhere
pub fn blend_rows(base: &Points, replacement: &Points, mask: &[bool]) -> Points {
    let mut out = base.clone();
    for (i, _) in mask.iter().enumerate().filter(|(_, &take)| take) {
        out.set_row(i, &replacement.row(i));
    }
    out
}

/// Column check for the infallible queries; a mismatch is a caller bug
pub fn debug_check_columns(points: &Points, ndim: usize) {
    debug_assert_eq!(
        points.ncols(),
        ndim,
        "expected {}-dimensional points, got {} columns",
        ndim,
        points.ncols()
    );
}

/// Reject batches whose column count differs from the geometry's dimension
pub fn check_columns(points: &Points, ndim: usize) -> Result<()> {
    if points.ncols() != ndim {
        return Err(GeometryError::InvalidInput(format!(
            "expected {}-dimensional points, got {} columns",
            ndim,
            points.ncols()
        )));
    }
    Ok(())
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for geometry queries and sampling

use thiserror::Error;

/// Errors raised by geometry construction and sampling
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Operands of a boolean composition live in different dimensions
    #[error("cannot combine a {left}-dimensional geometry with a {right}-dimensional geometry")]
    DimensionMismatch { left: usize, right: usize },

    /// Rejection sampling ran out of its iteration budget
    #[error(
        "unable to sample {requested} {kind} points: collected {collected} after {iterations} iterations \
         (region may be empty or too thin for its sampling domain)"
    )]
    SamplingExhausted {
        kind: &'static str,
        requested: usize,
        collected: usize,
        iterations: usize,
    },

    /// The sampling region is known to be empty before any attempt
    #[error("cannot sample {kind} points from an empty region")]
    EmptyRegion { kind: &'static str },

    /// The geometry does not implement this query
    #[error("{geometry} does not support {operation}")]
    Unsupported {
        geometry: &'static str,
        operation: &'static str,
    },

    /// Malformed arguments such as a wrong column count
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

/// Relative tolerance used by [`isclose`]
pub const RTOL: f64 = 1e-5;
/// Absolute tolerance used by [`isclose`]
pub const ATOL: f64 = 1e-8;

/// Asymmetric closeness test `|a - b| <= ATOL + RTOL * |b|`
pub fn isclose(a: f64, b: f64) -> bool {
    (a - b).abs() <= ATOL + RTOL * b.abs()
}

/// Euclidean distance between two coordinate sequences
pub fn distance<'a>(
    a: impl IntoIterator<Item = &'a f64>,
    b: impl IntoIterator<Item = &'a f64>,
) -> f64 {
    a.into_iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Volume of the unit ball in `ndim` dimensions
pub fn unit_ball_volume(ndim: usize) -> f64 {
    use std::f64::consts::PI;
    match ndim {
        0 => 1.0,
        1 => 2.0,
        n => 2.0 * PI / n as f64 * unit_ball_volume(n - 2),
    }
}

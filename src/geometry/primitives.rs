// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives: axis-aligned boxes and balls of any dimension

use super::point_utils::{check_columns, debug_check_columns};
use super::{BoundingBox, Geometry, Points};
use crate::error::{GeometryError, Result};
use crate::utils::math::{distance, isclose, unit_ball_volume};
use nalgebra::DVector;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

/// Axis-aligned box `[xmin, xmax]` in `ndim` dimensions
#[derive(Debug, Clone)]
pub struct Hypercube {
    bbox: BoundingBox,
    side: DVector<f64>,
    /// Measure of one face orthogonal to each axis
    face_measure: Vec<f64>,
}

impl Hypercube {
    pub fn new(xmin: &[f64], xmax: &[f64]) -> Result<Self> {
        let bbox = BoundingBox::from_slices(xmin, xmax)?;
        if bbox.ndim() == 0 {
            return Err(GeometryError::InvalidInput("hypercube needs at least one axis".into()));
        }
        if xmin.iter().zip(xmax).any(|(lo, hi)| lo >= hi) {
            return Err(GeometryError::InvalidInput(format!(
                "hypercube corners must satisfy xmin < xmax, got {:?} and {:?}",
                xmin, xmax
            )));
        }
        let side = bbox.size();
        let face_measure: Vec<f64> = (0..side.len())
            .map(|axis| {
                side.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != axis)
                    .map(|(_, s)| s)
                    .product::<f64>()
            })
            .collect();
        Ok(Self {
            bbox,
            side,
            face_measure,
        })
    }

    pub fn interval(l: f64, r: f64) -> Result<Self> {
        Self::new(&[l], &[r])
    }

    pub fn rectangle(xmin: [f64; 2], xmax: [f64; 2]) -> Result<Self> {
        Self::new(&xmin, &xmax)
    }

    pub fn cuboid(xmin: [f64; 3], xmax: [f64; 3]) -> Result<Self> {
        Self::new(&xmin, &xmax)
    }

    fn inside_row(&self, row: &[f64]) -> bool {
        self.bbox.contains(row)
    }

    fn on_face_row(&self, row: &[f64]) -> bool {
        row.iter()
            .enumerate()
            .any(|(j, &x)| isclose(x, self.bbox.min[j]) || isclose(x, self.bbox.max[j]))
    }
}

impl Geometry for Hypercube {
    fn name(&self) -> &'static str {
        match self.ndim() {
            1 => "Interval",
            2 => "Rectangle",
            3 => "Cuboid",
            _ => "Hypercube",
        }
    }

    fn ndim(&self) -> usize {
        self.bbox.ndim()
    }

    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    fn diam(&self) -> f64 {
        self.side.norm()
    }

    fn area(&self) -> Option<f64> {
        Some(self.side.iter().product())
    }

    fn perimeter(&self) -> Option<f64> {
        Some(2.0 * self.face_measure.iter().sum::<f64>())
    }

    fn is_inside(&self, points: &Points) -> Vec<bool> {
        rows(points, self.ndim()).map(|row| self.inside_row(&row)).collect()
    }

    fn on_boundary(&self, points: &Points) -> Vec<bool> {
        rows(points, self.ndim())
            .map(|row| self.inside_row(&row) && self.on_face_row(&row))
            .collect()
    }

    fn boundary_normal(&self, points: &Points) -> Points {
        let mut normals = Points::zeros(points.nrows(), self.ndim());
        for (i, row) in rows(points, self.ndim()).enumerate() {
            for (j, &x) in row.iter().enumerate() {
                if isclose(x, self.bbox.min[j]) {
                    normals[(i, j)] -= 1.0;
                }
                if isclose(x, self.bbox.max[j]) {
                    normals[(i, j)] += 1.0;
                }
            }
            // edges and corners get the normalized sum of their face normals
            let norm = normals.row(i).norm();
            if norm > 0.0 {
                normals.row_mut(i).unscale_mut(norm);
            }
        }
        normals
    }

    fn random_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        Ok(self.bbox.sample_uniform(n, rng))
    }

    fn random_boundary_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        let ndim = self.ndim();
        let total: f64 = self.face_measure.iter().sum();
        let mut points = self.bbox.sample_uniform(n, rng);
        for i in 0..n {
            // pick a face with probability proportional to its measure
            let mut target = rng.gen::<f64>() * total;
            let mut axis = ndim - 1;
            for (j, measure) in self.face_measure.iter().enumerate() {
                if target < *measure {
                    axis = j;
                    break;
                }
                target -= measure;
            }
            points[(i, axis)] = if rng.gen_bool(0.5) {
                self.bbox.min[axis]
            } else {
                self.bbox.max[axis]
            };
        }
        Ok(points)
    }

    fn periodic_point(&self, points: &Points, component: usize) -> Result<Points> {
        check_columns(points, self.ndim())?;
        if component >= self.ndim() {
            return Err(GeometryError::InvalidInput(format!(
                "component {} out of range for {}-dimensional {}",
                component,
                self.ndim(),
                self.name()
            )));
        }
        let (lo, hi) = (self.bbox.min[component], self.bbox.max[component]);
        let mut mapped = points.clone();
        for i in 0..points.nrows() {
            let x = points[(i, component)];
            if isclose(x, lo) {
                mapped[(i, component)] = hi;
            } else if isclose(x, hi) {
                mapped[(i, component)] = lo;
            }
        }
        Ok(mapped)
    }

    fn sdf_func(&self, points: &Points) -> Vec<f64> {
        let center = self.bbox.center();
        rows(points, self.ndim())
            .map(|row| {
                let q: Vec<f64> = row
                    .iter()
                    .enumerate()
                    .map(|(j, x)| (x - center[j]).abs() - self.side[j] / 2.0)
                    .collect();
                let outside = q.iter().map(|v| v.max(0.0).powi(2)).sum::<f64>().sqrt();
                let inside = q.iter().copied().fold(f64::NEG_INFINITY, f64::max).min(0.0);
                outside + inside
            })
            .collect()
    }
}

/// Closed ball of radius `radius` around `center`
#[derive(Debug, Clone)]
pub struct Hypersphere {
    center: DVector<f64>,
    radius: f64,
    bbox: BoundingBox,
}

impl Hypersphere {
    pub fn new(center: &[f64], radius: f64) -> Result<Self> {
        if center.is_empty() {
            return Err(GeometryError::InvalidInput("hypersphere needs at least one axis".into()));
        }
        if !(radius > 0.0) {
            return Err(GeometryError::InvalidInput(format!(
                "hypersphere radius must be positive, got {}",
                radius
            )));
        }
        let center = DVector::from_column_slice(center);
        let bbox = BoundingBox::new(center.add_scalar(-radius), center.add_scalar(radius))?;
        Ok(Self {
            center,
            radius,
            bbox,
        })
    }

    pub fn disk(center: [f64; 2], radius: f64) -> Result<Self> {
        Self::new(&center, radius)
    }

    pub fn sphere(center: [f64; 3], radius: f64) -> Result<Self> {
        Self::new(&center, radius)
    }

    pub fn center(&self) -> &DVector<f64> {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn distances(&self, points: &Points) -> Vec<f64> {
        debug_check_columns(points, self.ndim());
        points
            .row_iter()
            .map(|row| distance(row.iter(), self.center.iter()))
            .collect()
    }

    /// Uniform direction on the unit sphere from a normalized Gaussian vector
    fn unit_direction(&self, rng: &mut dyn RngCore) -> DVector<f64> {
        loop {
            let v = DVector::from_fn(self.ndim(), |_, _| rng.sample::<f64, _>(StandardNormal));
            let norm = v.norm();
            if norm > 0.0 {
                return v / norm;
            }
        }
    }

    /// Uniform point in the unit ball: a direction scaled by `u^(1/ndim)`
    fn unit_ball_point(&self, rng: &mut dyn RngCore) -> DVector<f64> {
        let scale = rng.gen::<f64>().powf(1.0 / self.ndim() as f64);
        self.unit_direction(rng) * scale
    }
}

impl Geometry for Hypersphere {
    fn name(&self) -> &'static str {
        match self.ndim() {
            2 => "Disk",
            3 => "Sphere",
            _ => "Hypersphere",
        }
    }

    fn ndim(&self) -> usize {
        self.center.len()
    }

    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    fn diam(&self) -> f64 {
        2.0 * self.radius
    }

    fn area(&self) -> Option<f64> {
        Some(unit_ball_volume(self.ndim()) * self.radius.powi(self.ndim() as i32))
    }

    fn perimeter(&self) -> Option<f64> {
        let d = self.ndim();
        Some(d as f64 * unit_ball_volume(d) * self.radius.powi(d as i32 - 1))
    }

    fn is_inside(&self, points: &Points) -> Vec<bool> {
        self.distances(points).into_iter().map(|d| d <= self.radius).collect()
    }

    fn on_boundary(&self, points: &Points) -> Vec<bool> {
        self.distances(points).into_iter().map(|d| isclose(d, self.radius)).collect()
    }

    fn boundary_normal(&self, points: &Points) -> Points {
        debug_check_columns(points, self.ndim());
        let mut normals = Points::zeros(points.nrows(), self.ndim());
        for (i, row) in points.row_iter().enumerate() {
            let offset = row.transpose() - &self.center;
            let norm = offset.norm();
            if norm > 0.0 {
                normals.set_row(i, &(offset / norm).transpose());
            }
        }
        normals
    }

    fn random_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        let mut points = Points::zeros(n, self.ndim());
        for i in 0..n {
            let p = &self.center + self.unit_ball_point(rng) * self.radius;
            points.set_row(i, &p.transpose());
        }
        Ok(points)
    }

    fn random_boundary_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        let mut points = Points::zeros(n, self.ndim());
        for i in 0..n {
            let p = &self.center + self.unit_direction(rng) * self.radius;
            points.set_row(i, &p.transpose());
        }
        Ok(points)
    }

    fn periodic_point(&self, _points: &Points, _component: usize) -> Result<Points> {
        Err(GeometryError::Unsupported {
            geometry: self.name(),
            operation: "periodic_point",
        })
    }

    fn sdf_func(&self, points: &Points) -> Vec<f64> {
        self.distances(points).into_iter().map(|d| d - self.radius).collect()
    }
}

fn rows(points: &Points, ndim: usize) -> impl Iterator<Item = Vec<f64>> + '_ {
    debug_check_columns(points, ndim);
    points.row_iter().map(|row| row.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    #[test]
    fn test_rectangle_measures() {
        let rect = Hypercube::rectangle([0.0, 0.0], [2.0, 1.0]).unwrap();
        assert_eq!(rect.name(), "Rectangle");
        assert_relative_eq!(rect.area().unwrap(), 2.0);
        assert_relative_eq!(rect.perimeter().unwrap(), 6.0);
        assert_relative_eq!(rect.diam(), 5.0_f64.sqrt());
    }

    #[test]
    fn test_interval_perimeter_counts_endpoints() {
        let interval = Hypercube::interval(-1.0, 3.0).unwrap();
        assert_relative_eq!(interval.area().unwrap(), 4.0);
        assert_relative_eq!(interval.perimeter().unwrap(), 2.0);
    }

    #[test]
    fn test_degenerate_box_rejected() {
        assert!(Hypercube::rectangle([0.0, 0.0], [0.0, 1.0]).is_err());
        assert!(Hypersphere::disk([0.0, 0.0], 0.0).is_err());
    }

    #[test]
    fn test_rectangle_predicates_and_normals() {
        let rect = Hypercube::rectangle([0.0, 0.0], [2.0, 1.0]).unwrap();
        let points = Points::from_row_slice(4, 2, &[1.0, 0.5, 2.0, 0.5, 2.0, 1.0, 3.0, 0.5]);
        assert_eq!(rect.is_inside(&points), vec![true, true, true, false]);
        assert_eq!(rect.on_boundary(&points), vec![false, true, true, false]);

        let normals = rect.boundary_normal(&points);
        assert_relative_eq!(normals[(1, 0)], 1.0);
        assert_relative_eq!(normals[(1, 1)], 0.0);
        let corner = 1.0 / 2.0_f64.sqrt();
        assert_relative_eq!(normals[(2, 0)], corner);
        assert_relative_eq!(normals[(2, 1)], corner);
    }

    #[test]
    fn test_box_sdf() {
        let cube = Hypercube::cuboid([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
        let points = Points::from_row_slice(3, 3, &[0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 2.0, 1.0]);
        let sdf = cube.sdf_func(&points);
        assert_relative_eq!(sdf[0], -1.0);
        assert_relative_eq!(sdf[1], 1.0);
        assert_relative_eq!(sdf[2], 2.0_f64.sqrt());
    }

    #[test]
    fn test_box_boundary_samples() {
        let cube = Hypercube::cuboid([0.0, 0.0, 0.0], [1.0, 2.0, 3.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let points = cube.random_boundary_points(500, &mut rng).unwrap();
        assert_eq!(points.nrows(), 500);
        assert!(cube.on_boundary(&points).into_iter().all(|b| b));
    }

    #[test]
    fn test_periodic_point() {
        let rect = Hypercube::rectangle([0.0, 0.0], [2.0, 1.0]).unwrap();
        let points = Points::from_row_slice(3, 2, &[0.0, 0.3, 2.0, 0.7, 1.0, 1.0]);
        let mapped = rect.periodic_point(&points, 0).unwrap();
        assert_eq!(mapped, Points::from_row_slice(3, 2, &[2.0, 0.3, 0.0, 0.7, 1.0, 1.0]));
        assert!(rect.periodic_point(&points, 2).is_err());
    }

    #[test]
    fn test_disk_measures_and_sdf() {
        let disk = Hypersphere::disk([1.0, 0.0], 2.0).unwrap();
        assert_relative_eq!(disk.area().unwrap(), 4.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(disk.perimeter().unwrap(), 4.0 * PI, epsilon = 1e-12);
        let points = Points::from_row_slice(2, 2, &[1.0, 0.0, 4.0, 0.0]);
        assert_eq!(disk.sdf_func(&points), vec![-2.0, 1.0]);
    }

    #[test]
    fn test_sphere_sampling() {
        let sphere = Hypersphere::sphere([0.0, 1.0, 0.0], 0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let interior = sphere.random_points(300, &mut rng).unwrap();
        assert!(sphere.is_inside(&interior).into_iter().all(|b| b));

        let boundary = sphere.random_boundary_points(300, &mut rng).unwrap();
        assert!(sphere.on_boundary(&boundary).into_iter().all(|b| b));

        let normals = sphere.boundary_normal(&boundary);
        for row in normals.row_iter() {
            assert_relative_eq!(row.norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sphere_has_no_periodic_mapping() {
        let sphere = Hypersphere::sphere([0.0, 0.0, 0.0], 1.0).unwrap();
        let err = sphere.periodic_point(&Points::zeros(1, 3), 0).unwrap_err();
        assert!(matches!(err, GeometryError::Unsupported { .. }));
    }

    #[test]
    fn test_high_dimensional_ball_sampling() {
        let ball = Hypersphere::new(&[0.0; 20], 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        let interior = ball.random_points(200, &mut rng).unwrap();
        assert_eq!(interior.shape(), (200, 20));
        assert!(ball.is_inside(&interior).into_iter().all(|b| b));
        // volume concentrates near the rim in high dimension
        let mean_radius: f64 =
            interior.row_iter().map(|row| row.norm()).sum::<f64>() / 200.0;
        assert!(mean_radius > 0.9, "mean radius {}", mean_radius);

        let boundary = ball.random_boundary_points(200, &mut rng).unwrap();
        assert!(ball.on_boundary(&boundary).into_iter().all(|b| b));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "expected 2-dimensional points")]
    fn test_box_query_rejects_wrong_columns() {
        let rect = Hypercube::rectangle([0.0, 0.0], [1.0, 1.0]).unwrap();
        rect.is_inside(&Points::zeros(1, 3));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "expected 2-dimensional points")]
    fn test_ball_query_rejects_wrong_columns() {
        let disk = Hypersphere::disk([0.0, 0.0], 1.0).unwrap();
        disk.sdf_func(&Points::zeros(1, 3));
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG (Constructive Solid Geometry) nodes over point-sampled geometries.
//!
//! Each node combines two operands with a boolean set operation and answers
//! the full [`Geometry`] interface itself, so nodes nest freely. Predicates
//! are exact boolean combinations of the operand predicates; `area` and
//! `perimeter` are approximations.

use super::base::{AssumptionKind, AssumptionWarning};
use super::point_utils::{blend_rows, check_columns, concat_rows, filter_rows, shuffle_rows};
use super::sampling::{accumulate, DEFAULT_MAX_ITERATIONS};
use super::{BoundingBox, Geometry, Points};
use crate::error::{GeometryError, Result};
use rand::RngCore;
use std::sync::{Arc, Mutex, PoisonError};

/// Boundary candidates drawn per perimeter estimate of a union
pub const PERIMETER_SAMPLES: usize = 1000;

fn check_dims(geom1: &dyn Geometry, geom2: &dyn Geometry) -> Result<()> {
    if geom1.ndim() != geom2.ndim() {
        return Err(GeometryError::DimensionMismatch {
            left: geom1.ndim(),
            right: geom2.ndim(),
        });
    }
    Ok(())
}

fn check_component(ndim: usize, component: usize) -> Result<()> {
    if component >= ndim {
        return Err(GeometryError::InvalidInput(format!(
            "component {} out of range for {}-dimensional geometry",
            component, ndim
        )));
    }
    Ok(())
}

fn and(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}

fn and_not(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x && !y).collect()
}

fn or(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x || y).collect()
}

fn not(a: &[bool]) -> Vec<bool> {
    a.iter().map(|&x| !x).collect()
}

/// Masked sum `clause1 * normals1 + sign2 * clause2 * normals2`
fn combine_normals(
    ndim: usize,
    (normals1, clause1): (&Points, &[bool]),
    (normals2, clause2): (&Points, &[bool]),
    sign2: f64,
) -> Points {
    let mut out = Points::zeros(clause1.len(), ndim);
    for i in 0..clause1.len() {
        for j in 0..ndim {
            if clause1[i] {
                out[(i, j)] += normals1[(i, j)];
            }
            if clause2[i] {
                out[(i, j)] += sign2 * normals2[(i, j)];
            }
        }
    }
    out
}

/// Remap rows of each clause through the matching operand's periodic mapping.
/// Operands are only queried when their clause selects at least one row.
fn remap_periodic(
    points: &Points,
    component: usize,
    remaps: &[(&dyn Geometry, &[bool])],
) -> Result<Points> {
    let mut out = points.clone();
    for (geom, clause) in remaps {
        if clause.iter().any(|&b| b) {
            let mapped = geom.periodic_point(points, component)?;
            out = blend_rows(&out, &mapped, clause);
        }
    }
    Ok(out)
}

/// Map an operand's empty-region error to `None`
fn empty_as_none(drawn: Result<Points>) -> Result<Option<Points>> {
    match drawn {
        Ok(points) => Ok(Some(points)),
        Err(GeometryError::EmptyRegion { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Boundary draw where an empty operand contributes no rows
fn boundary_or_empty(geom: &dyn Geometry, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
    Ok(empty_as_none(geom.random_boundary_points(n, rng))?
        .unwrap_or_else(|| Points::zeros(0, geom.ndim())))
}

fn fraction(mask: &[bool]) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    mask.iter().filter(|&&b| b).count() as f64 / mask.len() as f64
}

fn warn_if(
    warnings: &mut Vec<AssumptionWarning>,
    node: &str,
    kind: AssumptionKind,
    violated: &[bool],
) {
    let fraction = fraction(violated);
    if fraction > 0.0 {
        warnings.push(AssumptionWarning {
            node: node.to_string(),
            kind,
            fraction,
        });
    }
}

fn describe(name: &str, geom1: &dyn Geometry, geom2: &dyn Geometry) -> String {
    format!("{}({}, {})", name, geom1.name(), geom2.name())
}

/// `geom1 ∪ geom2`
#[derive(Debug)]
pub struct Union {
    geom1: Arc<dyn Geometry>,
    geom2: Arc<dyn Geometry>,
    bbox: BoundingBox,
    diam: f64,
    area: Option<f64>,
    /// Monte-Carlo estimate, refreshed by every boundary sampling batch
    perimeter: Mutex<Option<f64>>,
    max_iterations: usize,
}

impl Union {
    pub fn new(geom1: Arc<dyn Geometry>, geom2: Arc<dyn Geometry>) -> Result<Self> {
        Self::with_rng(geom1, geom2, &mut rand::thread_rng())
    }

    /// Build the union, drawing the initial perimeter estimate from `rng`
    pub fn with_rng(
        geom1: Arc<dyn Geometry>,
        geom2: Arc<dyn Geometry>,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        check_dims(geom1.as_ref(), geom2.as_ref())?;
        let bbox = geom1.bbox().union(geom2.bbox());
        let diam = geom1.diam() + geom2.diam();
        // assumes the operands do not overlap
        let area = geom1.area().zip(geom2.area()).map(|(a1, a2)| a1 + a2);
        let union = Self {
            geom1,
            geom2,
            bbox,
            diam,
            area,
            perimeter: Mutex::new(None),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        };
        if union.perimeter_sum().is_some() {
            union.boundary_batch(PERIMETER_SAMPLES, rng)?;
        }
        Ok(union)
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn geom1(&self) -> &Arc<dyn Geometry> {
        &self.geom1
    }

    pub fn geom2(&self) -> &Arc<dyn Geometry> {
        &self.geom2
    }

    fn perimeter_sum(&self) -> Option<f64> {
        self.geom1
            .perimeter()
            .zip(self.geom2.perimeter())
            .map(|(p1, p2)| p1 + p2)
    }

    /// Split `total` candidates between the operands by declared perimeter
    fn split(&self, total: usize) -> (usize, usize) {
        let n1 = match (self.geom1.perimeter(), self.geom2.perimeter()) {
            (Some(p1), Some(p2)) if p1 + p2 > 0.0 => {
                ((total as f64) * p1 / (p1 + p2)).round() as usize
            }
            _ => total / 2,
        }
        .min(total);
        (n1, total - n1)
    }

    /// One round of proportional boundary sampling. Refreshes the perimeter.
    fn boundary_batch(&self, total: usize, rng: &mut dyn RngCore) -> Result<Points> {
        let (n1, n2) = self.split(total);

        let (b1, b2) = match (
            empty_as_none(self.geom1.random_boundary_points(n1, rng))?,
            empty_as_none(self.geom2.random_boundary_points(n2, rng))?,
        ) {
            (None, None) => return Err(GeometryError::EmptyRegion { kind: "boundary" }),
            (b1, b2) => (
                b1.unwrap_or_else(|| Points::zeros(0, self.ndim())),
                b2.unwrap_or_else(|| Points::zeros(0, self.ndim())),
            ),
        };
        let b1 = filter_rows(&b1, &not(&self.geom2.is_inside(&b1)));
        let b2 = filter_rows(&b2, &not(&self.geom1.is_inside(&b2)));

        let points = shuffle_rows(&concat_rows(&b1, &b2), rng);
        if total > 0 {
            let estimate = self
                .perimeter_sum()
                .map(|sum| sum * points.nrows() as f64 / total as f64);
            *self.perimeter.lock().unwrap_or_else(PoisonError::into_inner) = estimate;
        }
        Ok(points)
    }

    fn boundary_clauses(&self, points: &Points) -> (Vec<bool>, Vec<bool>) {
        let clause1 = and_not(&self.geom1.on_boundary(points), &self.geom2.is_inside(points));
        let clause2 = and_not(&self.geom2.on_boundary(points), &self.geom1.is_inside(points));
        (clause1, clause2)
    }
}

impl Geometry for Union {
    fn name(&self) -> &'static str {
        "Union"
    }

    fn ndim(&self) -> usize {
        self.geom1.ndim()
    }

    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    fn diam(&self) -> f64 {
        self.diam
    }

    fn area(&self) -> Option<f64> {
        self.area
    }

    fn perimeter(&self) -> Option<f64> {
        *self.perimeter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_inside(&self, points: &Points) -> Vec<bool> {
        or(&self.geom1.is_inside(points), &self.geom2.is_inside(points))
    }

    fn on_boundary(&self, points: &Points) -> Vec<bool> {
        let (clause1, clause2) = self.boundary_clauses(points);
        or(&clause1, &clause2)
    }

    fn boundary_normal(&self, points: &Points) -> Points {
        let (clause1, clause2) = self.boundary_clauses(points);
        combine_normals(
            self.ndim(),
            (&self.geom1.boundary_normal(points), &clause1),
            (&self.geom2.boundary_normal(points), &clause2),
            1.0,
        )
    }

    fn random_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        accumulate(n, self.ndim(), self.max_iterations, "interior", || {
            let candidates = self.bbox.sample_uniform(n, rng);
            Ok(filter_rows(&candidates, &self.is_inside(&candidates)))
        })
    }

    fn random_boundary_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        let batch = n.max(PERIMETER_SAMPLES);
        accumulate(n, self.ndim(), self.max_iterations, "boundary", || {
            self.boundary_batch(batch, rng)
        })
    }

    fn periodic_point(&self, points: &Points, component: usize) -> Result<Points> {
        check_columns(points, self.ndim())?;
        check_component(self.ndim(), component)?;
        let (clause1, clause2) = self.boundary_clauses(points);
        remap_periodic(
            points,
            component,
            &[(self.geom1.as_ref(), &clause1[..]), (self.geom2.as_ref(), &clause2[..])],
        )
    }

    fn sdf_func(&self, points: &Points) -> Vec<f64> {
        let sdf1 = self.geom1.sdf_func(points);
        let sdf2 = self.geom2.sdf_func(points);
        sdf1.into_iter().zip(sdf2).map(|(a, b)| a.min(b)).collect()
    }

    fn validate(&self, samples: usize, rng: &mut dyn RngCore) -> Result<Vec<AssumptionWarning>> {
        let node = describe(self.name(), self.geom1.as_ref(), self.geom2.as_ref());
        let mut warnings = Vec::new();

        let probe = empty_as_none(self.geom1.random_points(samples, rng))?
            .unwrap_or_else(|| Points::zeros(0, self.ndim()));
        warn_if(
            &mut warnings,
            &node,
            AssumptionKind::OverlappingUnion,
            &self.geom2.is_inside(&probe),
        );

        let probe = concat_rows(
            &boundary_or_empty(self.geom1.as_ref(), samples, rng)?,
            &boundary_or_empty(self.geom2.as_ref(), samples, rng)?,
        );
        let (clause1, clause2) = self.boundary_clauses(&probe);
        warn_if(
            &mut warnings,
            &node,
            AssumptionKind::OverlappingNormals,
            &and(&clause1, &clause2),
        );

        warnings.extend(self.geom1.validate(samples, rng)?);
        warnings.extend(self.geom2.validate(samples, rng)?);
        Ok(warnings)
    }
}

/// `geom1 − geom2`
#[derive(Debug)]
pub struct Difference {
    geom1: Arc<dyn Geometry>,
    geom2: Arc<dyn Geometry>,
    area: Option<f64>,
    max_iterations: usize,
}

impl Difference {
    pub fn new(geom1: Arc<dyn Geometry>, geom2: Arc<dyn Geometry>) -> Result<Self> {
        check_dims(geom1.as_ref(), geom2.as_ref())?;
        // assumes geom2 lies entirely inside geom1
        let area = geom1.area().zip(geom2.area()).map(|(a1, a2)| a1 - a2);
        Ok(Self {
            geom1,
            geom2,
            area,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        })
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn geom1(&self) -> &Arc<dyn Geometry> {
        &self.geom1
    }

    pub fn geom2(&self) -> &Arc<dyn Geometry> {
        &self.geom2
    }

    fn boundary_clauses(&self, points: &Points) -> (Vec<bool>, Vec<bool>) {
        let clause1 = and_not(&self.geom1.on_boundary(points), &self.geom2.is_inside(points));
        let clause2 = and(&self.geom1.is_inside(points), &self.geom2.on_boundary(points));
        (clause1, clause2)
    }
}

impl Geometry for Difference {
    fn name(&self) -> &'static str {
        "Difference"
    }

    fn ndim(&self) -> usize {
        self.geom1.ndim()
    }

    fn bbox(&self) -> &BoundingBox {
        self.geom1.bbox()
    }

    fn diam(&self) -> f64 {
        self.geom1.diam()
    }

    fn area(&self) -> Option<f64> {
        self.area
    }

    fn perimeter(&self) -> Option<f64> {
        // assumes geom2 lies entirely inside geom1, so its whole rim is cut surface
        self.geom1
            .perimeter()
            .zip(self.geom2.perimeter())
            .map(|(p1, p2)| p1 + p2)
    }

    fn is_inside(&self, points: &Points) -> Vec<bool> {
        and_not(&self.geom1.is_inside(points), &self.geom2.is_inside(points))
    }

    fn on_boundary(&self, points: &Points) -> Vec<bool> {
        let (clause1, clause2) = self.boundary_clauses(points);
        or(&clause1, &clause2)
    }

    fn boundary_normal(&self, points: &Points) -> Points {
        let (clause1, clause2) = self.boundary_clauses(points);
        // the cut surface faces into the removed material
        combine_normals(
            self.ndim(),
            (&self.geom1.boundary_normal(points), &clause1),
            (&self.geom2.boundary_normal(points), &clause2),
            -1.0,
        )
    }

    fn random_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        accumulate(n, self.ndim(), self.max_iterations, "interior", || {
            let candidates = self.geom1.random_points(n, rng)?;
            Ok(filter_rows(&candidates, &not(&self.geom2.is_inside(&candidates))))
        })
    }

    fn random_boundary_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        accumulate(n, self.ndim(), self.max_iterations, "boundary", || {
            let b1 = self.geom1.random_boundary_points(n, rng)?;
            let b1 = filter_rows(&b1, &not(&self.geom2.is_inside(&b1)));
            let b2 = boundary_or_empty(self.geom2.as_ref(), n, rng)?;
            let b2 = filter_rows(&b2, &self.geom1.is_inside(&b2));
            Ok(shuffle_rows(&concat_rows(&b1, &b2), rng))
        })
    }

    fn periodic_point(&self, points: &Points, component: usize) -> Result<Points> {
        check_columns(points, self.ndim())?;
        check_component(self.ndim(), component)?;
        // the cut surface is never periodic
        let (clause1, _) = self.boundary_clauses(points);
        remap_periodic(points, component, &[(self.geom1.as_ref(), &clause1[..])])
    }

    fn sdf_func(&self, points: &Points) -> Vec<f64> {
        let sdf1 = self.geom1.sdf_func(points);
        let sdf2 = self.geom2.sdf_func(points);
        sdf1.into_iter().zip(sdf2).map(|(a, b)| a.max(-b)).collect()
    }

    fn validate(&self, samples: usize, rng: &mut dyn RngCore) -> Result<Vec<AssumptionWarning>> {
        let node = describe(self.name(), self.geom1.as_ref(), self.geom2.as_ref());
        let mut warnings = Vec::new();

        // containment: the whole of geom2 lies in geom1 iff its boundary does
        let probe = boundary_or_empty(self.geom2.as_ref(), samples, rng)?;
        warn_if(
            &mut warnings,
            &node,
            AssumptionKind::UncontainedSubtrahend,
            &not(&self.geom1.is_inside(&probe)),
        );

        let probe = concat_rows(&probe, &boundary_or_empty(self.geom1.as_ref(), samples, rng)?);
        let (clause1, clause2) = self.boundary_clauses(&probe);
        warn_if(
            &mut warnings,
            &node,
            AssumptionKind::OverlappingNormals,
            &and(&clause1, &clause2),
        );

        warnings.extend(self.geom1.validate(samples, rng)?);
        warnings.extend(self.geom2.validate(samples, rng)?);
        Ok(warnings)
    }
}

/// `geom1 ∩ geom2`
#[derive(Debug)]
pub struct Intersection {
    geom1: Arc<dyn Geometry>,
    geom2: Arc<dyn Geometry>,
    bbox: BoundingBox,
    diam: f64,
    max_iterations: usize,
}

impl Intersection {
    pub fn new(geom1: Arc<dyn Geometry>, geom2: Arc<dyn Geometry>) -> Result<Self> {
        check_dims(geom1.as_ref(), geom2.as_ref())?;
        let bbox = geom1.bbox().intersection(geom2.bbox());
        let diam = geom1.diam().min(geom2.diam());
        Ok(Self {
            geom1,
            geom2,
            bbox,
            diam,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        })
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn geom1(&self) -> &Arc<dyn Geometry> {
        &self.geom1
    }

    pub fn geom2(&self) -> &Arc<dyn Geometry> {
        &self.geom2
    }

    fn boundary_clauses(&self, points: &Points) -> (Vec<bool>, Vec<bool>) {
        let clause1 = and(&self.geom1.on_boundary(points), &self.geom2.is_inside(points));
        let clause2 = and(&self.geom1.is_inside(points), &self.geom2.on_boundary(points));
        (clause1, clause2)
    }

    fn ensure_nonempty(&self, kind: &'static str) -> Result<()> {
        if self.bbox.is_empty() {
            return Err(GeometryError::EmptyRegion { kind });
        }
        Ok(())
    }
}

impl Geometry for Intersection {
    fn name(&self) -> &'static str {
        "Intersection"
    }

    fn ndim(&self) -> usize {
        self.geom1.ndim()
    }

    fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    fn diam(&self) -> f64 {
        self.diam
    }

    fn area(&self) -> Option<f64> {
        None
    }

    fn perimeter(&self) -> Option<f64> {
        None
    }

    fn is_inside(&self, points: &Points) -> Vec<bool> {
        and(&self.geom1.is_inside(points), &self.geom2.is_inside(points))
    }

    fn on_boundary(&self, points: &Points) -> Vec<bool> {
        let (clause1, clause2) = self.boundary_clauses(points);
        or(&clause1, &clause2)
    }

    fn boundary_normal(&self, points: &Points) -> Points {
        let (clause1, clause2) = self.boundary_clauses(points);
        combine_normals(
            self.ndim(),
            (&self.geom1.boundary_normal(points), &clause1),
            (&self.geom2.boundary_normal(points), &clause2),
            1.0,
        )
    }

    fn random_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        if n > 0 {
            self.ensure_nonempty("interior")?;
        }
        accumulate(n, self.ndim(), self.max_iterations, "interior", || {
            let candidates = self.geom1.random_points(n, rng)?;
            Ok(filter_rows(&candidates, &self.geom2.is_inside(&candidates)))
        })
    }

    fn random_boundary_points(&self, n: usize, rng: &mut dyn RngCore) -> Result<Points> {
        if n > 0 {
            self.ensure_nonempty("boundary")?;
        }
        accumulate(n, self.ndim(), self.max_iterations, "boundary", || {
            let b1 = self.geom1.random_boundary_points(n, rng)?;
            let b1 = filter_rows(&b1, &self.geom2.is_inside(&b1));
            let b2 = self.geom2.random_boundary_points(n, rng)?;
            let b2 = filter_rows(&b2, &self.geom1.is_inside(&b2));
            Ok(shuffle_rows(&concat_rows(&b1, &b2), rng))
        })
    }

    fn periodic_point(&self, points: &Points, component: usize) -> Result<Points> {
        check_columns(points, self.ndim())?;
        check_component(self.ndim(), component)?;
        let (clause1, clause2) = self.boundary_clauses(points);
        remap_periodic(
            points,
            component,
            &[(self.geom1.as_ref(), &clause1[..]), (self.geom2.as_ref(), &clause2[..])],
        )
    }

    fn sdf_func(&self, points: &Points) -> Vec<f64> {
        let sdf1 = self.geom1.sdf_func(points);
        let sdf2 = self.geom2.sdf_func(points);
        sdf1.into_iter().zip(sdf2).map(|(a, b)| a.max(b)).collect()
    }

    fn validate(&self, samples: usize, rng: &mut dyn RngCore) -> Result<Vec<AssumptionWarning>> {
        let node = describe(self.name(), self.geom1.as_ref(), self.geom2.as_ref());
        let mut warnings = Vec::new();

        let probe = concat_rows(
            &boundary_or_empty(self.geom1.as_ref(), samples, rng)?,
            &boundary_or_empty(self.geom2.as_ref(), samples, rng)?,
        );
        let (clause1, clause2) = self.boundary_clauses(&probe);
        warn_if(
            &mut warnings,
            &node,
            AssumptionKind::OverlappingNormals,
            &and(&clause1, &clause2),
        );

        warnings.extend(self.geom1.validate(samples, rng)?);
        warnings.extend(self.geom2.validate(samples, rng)?);
        Ok(warnings)
    }
}

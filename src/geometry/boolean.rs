// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boolean operations as shared geometry handles

use super::csg::{Difference, Intersection, Union};
use super::Geometry;
use crate::error::Result;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

impl BooleanOp {
    /// Combine two geometries, bounding every rejection loop by `max_iterations`
    pub fn apply(
        self,
        a: Arc<dyn Geometry>,
        b: Arc<dyn Geometry>,
        max_iterations: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Arc<dyn Geometry>> {
        let combined: Arc<dyn Geometry> = match self {
            BooleanOp::Union => {
                Arc::new(Union::with_rng(a, b, rng)?.with_max_iterations(max_iterations))
            }
            BooleanOp::Difference => {
                Arc::new(Difference::new(a, b)?.with_max_iterations(max_iterations))
            }
            BooleanOp::Intersection => {
                Arc::new(Intersection::new(a, b)?.with_max_iterations(max_iterations))
            }
        };
        Ok(combined)
    }
}

/// `a ∪ b`
pub fn union(a: Arc<dyn Geometry>, b: Arc<dyn Geometry>) -> Result<Arc<dyn Geometry>> {
    Ok(Arc::new(Union::new(a, b)?))
}

/// `a − b`
pub fn difference(a: Arc<dyn Geometry>, b: Arc<dyn Geometry>) -> Result<Arc<dyn Geometry>> {
    Ok(Arc::new(Difference::new(a, b)?))
}

/// `a ∩ b`
pub fn intersection(a: Arc<dyn Geometry>, b: Arc<dyn Geometry>) -> Result<Arc<dyn Geometry>> {
    Ok(Arc::new(Intersection::new(a, b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Hypercube, Hypersphere, Points};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_apply_nests() {
        let mut rng = StdRng::seed_from_u64(0);
        let plate: Arc<dyn Geometry> = Arc::new(Hypercube::rectangle([-1.0, -1.0], [1.0, 1.0]).unwrap());
        let hole: Arc<dyn Geometry> = Arc::new(Hypersphere::disk([0.0, 0.0], 0.5).unwrap());
        let tab: Arc<dyn Geometry> = Arc::new(Hypercube::rectangle([1.0, -0.2], [1.5, 0.2]).unwrap());

        let plate_with_hole = BooleanOp::Difference.apply(plate, hole, 100, &mut rng).unwrap();
        let part = BooleanOp::Union.apply(plate_with_hole, tab, 100, &mut rng).unwrap();

        let points = Points::from_row_slice(3, 2, &[0.0, 0.0, 0.75, 0.75, 1.25, 0.0]);
        assert_eq!(part.is_inside(&points), vec![false, true, true]);
        assert_eq!(part.name(), "Union");
    }

    #[test]
    fn test_free_functions() {
        let a: Arc<dyn Geometry> = Arc::new(Hypersphere::disk([0.0, 0.0], 1.0).unwrap());
        let b: Arc<dyn Geometry> = Arc::new(Hypersphere::disk([1.0, 0.0], 1.0).unwrap());
        assert_eq!(union(a.clone(), b.clone()).unwrap().name(), "Union");
        assert_eq!(difference(a.clone(), b.clone()).unwrap().name(), "Difference");
        assert_eq!(intersection(a, b).unwrap().name(), "Intersection");
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene evaluator - converts a scene tree into a geometry handle

use super::{Node, NodeKind};
use crate::config::SamplingConfig;
use crate::geometry::{BooleanOp, Geometry, Hypercube, Hypersphere, DEFAULT_MAX_ITERATIONS};
use anyhow::{anyhow, bail, Context, Result};
use dashmap::DashMap;
use rand::RngCore;
use std::sync::Arc;

/// Scene evaluator with id-based sharing.
///
/// A node carrying an id is built once; later nodes with the same id or a
/// `Ref` to it reuse the same geometry, so the result can be a DAG.
pub struct Evaluator {
    cache: DashMap<String, Arc<dyn Geometry>>,
    max_iterations: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_config(config: &SamplingConfig) -> Self {
        Self {
            cache: DashMap::new(),
            max_iterations: config.max_iterations,
        }
    }

    /// Evaluate a scene node. `rng` seeds union perimeter estimates.
    pub fn evaluate(&self, node: &Node, rng: &mut dyn RngCore) -> Result<Arc<dyn Geometry>> {
        if let Some(id) = &node.id {
            if let Some(geom) = self.cache.get(id) {
                return Ok(Arc::clone(geom.value()));
            }
        }

        let geom = self.evaluate_node(&node.kind, rng)?;

        if let Some(id) = &node.id {
            self.cache.insert(id.clone(), geom.clone());
        }

        Ok(geom)
    }

    /// Geometry built for `id`, if any
    pub fn cached(&self, id: &str) -> Option<Arc<dyn Geometry>> {
        self.cache.get(id).map(|entry| Arc::clone(entry.value()))
    }

    fn evaluate_node(&self, kind: &NodeKind, rng: &mut dyn RngCore) -> Result<Arc<dyn Geometry>> {
        let geom: Arc<dyn Geometry> = match kind {
            NodeKind::Interval { l, r } => Arc::new(Hypercube::interval(*l, *r)?),
            NodeKind::Rectangle { xmin, xmax } => Arc::new(Hypercube::rectangle(*xmin, *xmax)?),
            NodeKind::Cuboid { xmin, xmax } => Arc::new(Hypercube::cuboid(*xmin, *xmax)?),
            NodeKind::Disk { center, radius } => Arc::new(Hypersphere::disk(*center, *radius)?),
            NodeKind::Sphere { center, radius } => {
                Arc::new(Hypersphere::sphere(*center, *radius)?)
            }

            NodeKind::Union(children) => self.evaluate_boolean(children, BooleanOp::Union, rng)?,
            NodeKind::Difference(children) => {
                self.evaluate_boolean(children, BooleanOp::Difference, rng)?
            }
            NodeKind::Intersection(children) => {
                self.evaluate_boolean(children, BooleanOp::Intersection, rng)?
            }

            NodeKind::Ref(id) => self
                .cached(id)
                .ok_or_else(|| anyhow!("Reference to undefined node id '{}'", id))?,
        };
        Ok(geom)
    }

    fn evaluate_boolean(
        &self,
        children: &[Node],
        op: BooleanOp,
        rng: &mut dyn RngCore,
    ) -> Result<Arc<dyn Geometry>> {
        let Some((first, rest)) = children.split_first() else {
            bail!("{:?} needs at least one child", op);
        };

        let mut result = self
            .evaluate(first, rng)
            .context("Failed to evaluate first child")?;

        for child in rest {
            let child_geom = self.evaluate(child, rng).context("Failed to evaluate child")?;

            result = op
                .apply(result, child_geom, self.max_iterations, rng)
                .with_context(|| format!("{:?} operation failed", op))?;
        }

        Ok(result)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

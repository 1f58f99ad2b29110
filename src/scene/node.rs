// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene node definitions

use serde::{Deserialize, Serialize};

/// Scene node representing a single primitive or boolean operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, id: None }
    }

    pub fn with_id(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }
}

/// Types of scene nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    // Primitives
    Interval { l: f64, r: f64 },
    Rectangle { xmin: [f64; 2], xmax: [f64; 2] },
    Cuboid { xmin: [f64; 3], xmax: [f64; 3] },
    Disk { center: [f64; 2], radius: f64 },
    Sphere { center: [f64; 3], radius: f64 },

    // Boolean operations, folded left over the children
    Union(Vec<Node>),
    Difference(Vec<Node>),
    Intersection(Vec<Node>),

    /// Reuse of a node declared earlier with the same id
    Ref(String),
}


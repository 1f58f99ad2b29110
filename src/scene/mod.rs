// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene description module
//!
//! A serializable CSG tree that evaluates to a shared geometry handle

mod evaluator;
mod importer;
mod node;

pub use evaluator::Evaluator;
pub use importer::{import_scene_file, parse_scene};
pub use node::{Node, NodeKind};

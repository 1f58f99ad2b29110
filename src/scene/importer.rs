// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene file importer

use super::Node;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a JSON scene description
pub fn parse_scene(source: &str) -> Result<Node> {
    serde_json::from_str(source).context("Invalid scene description")
}

/// Import a JSON scene file
pub fn import_scene_file(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

    parse_scene(&source).with_context(|| format!("Failed to parse scene file: {}", path.display()))
}

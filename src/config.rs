// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sampling configuration system

use crate::geometry::DEFAULT_MAX_ITERATIONS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`SamplingConfig::load`]
pub const CONFIG_FILE: &str = "sampling.toml";

/// Sampling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Upper bound on rejection-sampling rounds per request
    pub max_iterations: usize,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Probe points per node when checking approximations
    pub validation_samples: usize,
    /// Probe points for the Monte-Carlo area estimate
    pub stats_samples: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            validation_samples: 2_000,
            stats_samples: 20_000,
        }
    }
}

impl SamplingConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: SamplingConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `PINN_GEOMETRY_*` environment variables on top of the current values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(seed) = std::env::var("PINN_GEOMETRY_SEED") {
            self.seed = Some(
                seed.parse()
                    .with_context(|| format!("Invalid PINN_GEOMETRY_SEED: {}", seed))?,
            );
        }

        if let Ok(max_iterations) = std::env::var("PINN_GEOMETRY_MAX_ITERATIONS") {
            self.max_iterations = max_iterations.parse().with_context(|| {
                format!("Invalid PINN_GEOMETRY_MAX_ITERATIONS: {}", max_iterations)
            })?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_reload() {
        let config = SamplingConfig {
            max_iterations: 50,
            seed: Some(42),
            ..SamplingConfig::default()
        };
        let file = NamedTempFile::new().unwrap();
        config.save(file.path()).unwrap();
        assert_eq!(SamplingConfig::from_file(file.path()).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "seed = 7\n").unwrap();
        let config = SamplingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_malformed_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "max_iterations = \"lots\"\n").unwrap();
        let err = SamplingConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

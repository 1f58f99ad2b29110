// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! PINN Geometry CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use pinn_geometry::cli::{Reporter, SampleSet};
use pinn_geometry::{load_geometry_file, Sampler, SamplingConfig};
use std::path::Path;

#[derive(Parser)]
#[command(name = "pinn-geometry")]
#[command(about = "CSG geometry engine for collocation-point sampling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./sampling.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// RNG seed, overrides the config file
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample interior and boundary points from a scene
    Sample {
        /// Input scene file (JSON)
        scene: String,

        /// Number of interior points
        #[arg(short, long, default_value = "1000")]
        interior: usize,

        /// Number of boundary points
        #[arg(short, long, default_value = "200")]
        boundary: usize,

        /// Output JSON file, stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print bounding box, measures and a Monte-Carlo area estimate
    Stats {
        /// Input scene file (JSON)
        scene: String,
    },

    /// Check the approximations every composite relies on
    Validate {
        /// Input scene file (JSON)
        scene: String,

        /// Probe points per node, overrides the config file
        #[arg(long)]
        samples: Option<usize>,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Sample {
            scene,
            interior,
            boundary,
            output,
        } => {
            let mut sampler = build_sampler(&cli, None)?;
            sample_command(&mut sampler, scene, *interior, *boundary, output.as_deref(), cli.verbose)?;
        }
        Commands::Stats { scene } => {
            let mut sampler = build_sampler(&cli, None)?;
            stats_command(&mut sampler, scene, cli.verbose)?;
        }
        Commands::Validate { scene, samples } => {
            let mut sampler = build_sampler(&cli, *samples)?;
            validate_command(&mut sampler, scene, cli.verbose)?;
        }
        Commands::Version => {
            println!("PINN Geometry v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn build_sampler(cli: &Cli, validation_samples: Option<usize>) -> Result<Sampler> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = SamplingConfig::from_file(path)?;
            config.apply_env_overrides()?;
            config
        }
        None => SamplingConfig::load()?,
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(samples) = validation_samples {
        config.validation_samples = samples;
    }

    if cli.verbose {
        Reporter::report_info(&format!(
            "max_iterations={} seed={}",
            config.max_iterations,
            config
                .seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "entropy".to_string())
        ));
    }

    Ok(Sampler::new(config))
}

fn check_input(scene: &str) {
    if !Path::new(scene).exists() {
        Reporter::report_error(&format!("Scene file not found: {}", scene));
        std::process::exit(1);
    }
}

fn sample_command(
    sampler: &mut Sampler,
    scene: &str,
    interior: usize,
    boundary: usize,
    output: Option<&str>,
    verbose: bool,
) -> Result<()> {
    check_input(scene);

    let start = std::time::Instant::now();
    let geom = load_geometry_file(scene, sampler)?;
    if verbose {
        Reporter::report_info(&format!("Built {} ({}D)", geom.name(), geom.ndim()));
    }

    let interior_sample = sampler.interior(geom.as_ref(), interior)?;
    let boundary_sample = sampler.boundary(geom.as_ref(), boundary)?;
    let samples = SampleSet::new(geom.ndim(), &interior_sample, &boundary_sample);
    let elapsed = start.elapsed();

    match output {
        Some(path) => {
            samples.write_json(path)?;
            Reporter::report_sampling(scene, interior, boundary, Some(path), elapsed);
        }
        None => {
            println!("{}", samples.to_json()?);
            if verbose {
                Reporter::report_info(&format!("Sampled in {:.2?}", elapsed));
            }
        }
    }

    Ok(())
}

fn stats_command(sampler: &mut Sampler, scene: &str, verbose: bool) -> Result<()> {
    check_input(scene);

    let geom = load_geometry_file(scene, sampler)?;
    if verbose {
        Reporter::report_info(&format!(
            "Probing with {} points",
            sampler.config().stats_samples
        ));
    }
    let stats = sampler.stats(geom.as_ref());
    Reporter::report_stats(scene, &stats);

    Ok(())
}

fn validate_command(sampler: &mut Sampler, scene: &str, verbose: bool) -> Result<()> {
    check_input(scene);

    let geom = load_geometry_file(scene, sampler)?;
    if verbose {
        Reporter::report_info(&format!("Validating {} tree", geom.name()));
    }
    let report = sampler.validate(geom.as_ref())?;
    Reporter::report_validation(scene, &report);

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::{GeometryStats, ValidationReport};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report geometry statistics
    pub fn report_stats(file: &str, stats: &GeometryStats) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Scene:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        println!(
            "  {} {} ({}D)",
            "Root:".bright_black(),
            stats.name.cyan(),
            stats.ndim
        );
        println!(
            "  {} {} → {}",
            "BBox:".bright_black(),
            Self::format_vector(&stats.bbox_min),
            Self::format_vector(&stats.bbox_max)
        );
        println!(
            "  {} {}",
            "Diameter:".bright_black(),
            format!("{:.6}", stats.diam).cyan()
        );

        println!("\n{}", "Measures:".bold());
        Self::print_measure("Area", stats.area);
        Self::print_measure("Perimeter", stats.perimeter);

        let estimate = format!("{:.6} ({} probes)", stats.estimated_area, stats.samples);
        match stats.area_error() {
            Some(error) => Self::print_metric("Estimated", &estimate, error),
            None => println!("  {} {}", "Estimated:".bright_black(), estimate.yellow()),
        }

        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report the outcome of an approximation check
    pub fn report_validation(file: &str, report: &ValidationReport) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Scene:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if report.is_clean() {
            println!(
                "{} {}",
                "✅".green(),
                "All approximations hold".green().bold()
            );
        } else {
            println!(
                "{} {}",
                "⚠️ ".yellow(),
                format!("{} approximation(s) violated", report.warnings.len())
                    .yellow()
                    .bold()
            );
            for warning in &report.warnings {
                println!(
                    "  {} {} {} ({:.2}% of probes)",
                    "•".yellow(),
                    format!("{}:", warning.node).bold(),
                    warning.kind.describe(),
                    warning.fraction * 100.0
                );
            }
        }

        println!(
            "\n  {} {}",
            "Probes per node:".bright_black(),
            report.samples.to_string().cyan()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a finished sampling run
    pub fn report_sampling(
        file: &str,
        interior: usize,
        boundary: usize,
        output: Option<&str>,
        duration: Duration,
    ) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Sampled:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Interior:".bright_black(),
            interior.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Boundary:".bright_black(),
            boundary.to_string().cyan()
        );
        if let Some(output) = output {
            println!("  {} {}", "Output:".bright_black(), output.cyan());
        }
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        eprintln!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_measure(name: &str, value: Option<f64>) {
        let formatted = match value {
            Some(v) => format!("{:.6}", v).cyan(),
            None => "unknown".bright_black(),
        };
        println!("  {} {}", format!("{}:", name).bright_black(), formatted);
    }

    /// Print a metric with color coding based on relative error
    fn print_metric(name: &str, value: &str, delta: f64) {
        let formatted_value = if delta < 0.01 {
            value.green()
        } else if delta < 0.05 {
            value.yellow()
        } else {
            value.red()
        };

        println!(
            "  {} {} {}",
            format!("{}:", name).bright_black(),
            formatted_value,
            format!("(Δ{:.2}%)", delta * 100.0).bright_black()
        );
    }

    fn format_vector(values: &[f64]) -> String {
        let parts: Vec<String> = values.iter().map(|v| format!("{:.4}", v)).collect();
        format!("[{}]", parts.join(", "))
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

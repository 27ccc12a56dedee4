//! Simulate command implementation.

use crate::commands::emit;
use crate::config::Overrides;
use anyhow::{Context, Result};
use bitwrap_report::{export, Export, OutputFormat};
use bitwrap_sim::Simulator;
use tracing::{info, warn};

/// Runs the simulate command.
pub fn run(overrides: &Overrides, format: &str, output: Option<&str>) -> Result<()> {
    let format: OutputFormat = format
        .parse()
        .with_context(|| format!("Unknown output format: {format}"))?;

    let config = overrides.resolve()?;
    info!(
        "Doubling {} in {} over {} iterations",
        config.start_value, config.register, config.iterations
    );

    let result = Simulator::new()
        .simulate(&config)
        .with_context(|| "Simulation failed")?;

    match result.divergence_index {
        Some(index) => info!("Register overflows at iteration {}", index),
        None => warn!("No overflow within {} iterations", config.iterations),
    }

    let content = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&Export::new(&result).with_timestamp())
                .with_context(|| "Failed to serialize export")?
        }
        OutputFormat::Yaml => serde_yaml::to_string(&Export::new(&result).with_timestamp())
            .with_context(|| "Failed to serialize export")?,
        OutputFormat::Text | OutputFormat::Csv => {
            export(&result, format).with_context(|| "Failed to render output")?
        }
    };

    emit(&content, output)
}

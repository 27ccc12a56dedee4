//! Collatz command implementation.

use crate::commands::emit;
use crate::config::{parse_register, parse_start};
use anyhow::{Context, Result};
use bitwrap_report::{export_collatz, OutputFormat};
use tracing::{info, warn};

/// Runs the collatz command.
pub fn run(
    start: &str,
    register: &str,
    max_steps: usize,
    format: &str,
    output: Option<&str>,
) -> Result<()> {
    let format: OutputFormat = format
        .parse()
        .with_context(|| format!("Unknown output format: {format}"))?;
    let register = parse_register(register)?;
    let start = parse_start(start)?;

    info!("Tracing Collatz trajectory of {} in {}", start, register);

    let result = bitwrap_sim::collatz(&start, register, max_steps)
        .with_context(|| "Collatz trace failed")?;

    if let Some(step) = result.divergence_index {
        warn!("{} overflows at step {}", register, step);
    }
    if !result.exact_reached_one {
        warn!("Exact trajectory did not reach 1 within {} steps", max_steps);
    }

    let content = export_collatz(&result, format).with_context(|| "Failed to render output")?;
    emit(&content, output)
}

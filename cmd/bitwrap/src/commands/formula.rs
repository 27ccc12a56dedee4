//! Formula command implementation.

use crate::config::{parse_register, parse_start};
use anyhow::{Context, Result};

/// Runs the formula command.
pub fn run(register: &str, start: &str) -> Result<()> {
    let register = parse_register(register)?;
    let start = parse_start(start)?;

    if !register.contains(&start) {
        anyhow::bail!(
            "Start value {start} does not fit in {register} (range {}..={})",
            register.min(),
            register.max()
        );
    }

    let text = bitwrap_report::formula(register, &start);
    super::emit(&text, None).with_context(|| "Failed to print formula")
}

//! Subcommand implementations.

pub mod collatz;
pub mod formula;
pub mod simulate;

use anyhow::{Context, Result};
use std::fs;
use tracing::info;

/// Writes command output to `path`, or to stdout when no path is given.
pub fn emit(content: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {path}"))?;
            info!("Output written to: {}", path);
        }
        None if content.ends_with('\n') => print!("{content}"),
        None => println!("{content}"),
    }
    Ok(())
}

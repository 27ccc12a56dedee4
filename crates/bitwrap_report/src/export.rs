//! Machine-readable export of simulation results.
//!
//! CSV carries one row per iteration for plotting tools. JSON and YAML wrap
//! the same rows in an [`Export`] envelope together with the configuration,
//! the overflow analysis and a fingerprint of the sequences.

use crate::error::{Error, Result};
use crate::report::{render_collatz, render_report};
use bitwrap_register::SimulationConfig;
use bitwrap_sim::{analyze, CollatzResult, OverflowAnalysis, SimulationResult};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use xxhash_rust::xxh64::Xxh64;

/// Seed for xxhash to ensure deterministic fingerprints.
const FINGERPRINT_SEED: u64 = 0x0042_4954_5752_4150; // "BITWRAP" in hex

/// Export envelope format version.
const EXPORT_VERSION: u32 = 1;

/// Output format for exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON envelope.
    Json,
    /// YAML envelope.
    Yaml,
    /// One CSV row per iteration.
    Csv,
}

impl OutputFormat {
    /// Whether this format carries an [`Export`] envelope.
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// One iteration of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Iteration number.
    pub iteration: usize,
    /// Exact value.
    #[serde(with = "bitwrap_register::decimal")]
    pub exact: BigInt,
    /// Register value.
    #[serde(with = "bitwrap_register::decimal")]
    pub wrapped: BigInt,
    /// Whether the register has left the exact sequence.
    pub diverged: bool,
}

/// Structured export of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    /// Envelope format version.
    pub version: u32,
    /// When the export was produced (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub generated_at: Option<String>,
    /// Fingerprint of the configuration and both sequences.
    pub fingerprint: String,
    /// Configuration that produced the sequences.
    pub config: SimulationConfig,
    /// First diverging iteration.
    pub divergence_index: Option<usize>,
    /// Overflow analysis.
    pub analysis: OverflowAnalysis,
    /// Per-iteration values.
    pub rows: Vec<Row>,
}

impl Export {
    /// Builds an export without a timestamp.
    #[must_use]
    pub fn new(result: &SimulationResult) -> Self {
        Self {
            version: EXPORT_VERSION,
            generated_at: None,
            fingerprint: fingerprint(result),
            config: result.config.clone(),
            divergence_index: result.divergence_index,
            analysis: analyze(result),
            rows: rows(result),
        }
    }

    /// Stamps the export with the current time.
    #[must_use]
    pub fn with_timestamp(mut self) -> Self {
        self.generated_at = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

/// Renders a simulation in the requested format.
///
/// Structured formats are not timestamped; use [`Export::with_timestamp`]
/// directly when a timestamp is wanted.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export(result: &SimulationResult, format: OutputFormat) -> Result<String> {
    debug!(format = %format, rows = result.len(), "exporting simulation");
    match format {
        OutputFormat::Text => Ok(render_report(result, &analyze(result))),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Export::new(result))?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&Export::new(result))?),
        OutputFormat::Csv => write_csv(&rows(result)),
    }
}

#[derive(Serialize)]
struct CollatzRow {
    step: usize,
    exact: Option<String>,
    wrapped: Option<String>,
}

/// Renders a Collatz run in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_collatz(result: &CollatzResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_collatz(result)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(result)?),
        OutputFormat::Csv => {
            let len = result.exact.len().max(result.wrapped.len());
            let rows: Vec<CollatzRow> = (0..len)
                .map(|step| CollatzRow {
                    step,
                    exact: result.exact.get(step).map(ToString::to_string),
                    wrapped: result.wrapped.get(step).map(ToString::to_string),
                })
                .collect();
            write_csv(&rows)
        }
    }
}

/// Fingerprints a simulation with xxh64.
///
/// Identical configurations always produce identical fingerprints.
#[must_use]
pub fn fingerprint(result: &SimulationResult) -> String {
    let mut hasher = Xxh64::new(FINGERPRINT_SEED);
    hasher.update(result.config.register.to_string().as_bytes());
    hasher.update(b"\n");
    for (exact, wrapped) in result.exact.iter().zip(&result.wrapped) {
        hasher.update(exact.to_string().as_bytes());
        hasher.update(b",");
        hasher.update(wrapped.to_string().as_bytes());
        hasher.update(b"\n");
    }
    format!("{:016x}", hasher.digest())
}

fn rows(result: &SimulationResult) -> Vec<Row> {
    result
        .steps()
        .map(|step| Row {
            iteration: step.index,
            exact: step.exact.clone(),
            wrapped: step.wrapped.clone(),
            diverged: step.diverged,
        })
        .collect()
}

fn write_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

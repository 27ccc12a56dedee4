//! Reports and exports for Bitwrap simulations.
//!
//! This crate is **pure and deterministic** apart from the optional export
//! timestamp: the same simulation always renders to the same text and the
//! same fingerprint. Charts are left to whatever consumes the CSV/JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use bitwrap_report::{export, OutputFormat};
//!
//! let result = bitwrap_sim::simulate(&config)?;
//! let csv = export(&result, OutputFormat::Csv)?;
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::format_push_string)]

pub mod error;
pub mod export;
pub mod formula;
pub mod report;

pub use error::{Error, Result};
pub use export::{export, export_collatz, fingerprint, Export, OutputFormat, Row};
pub use formula::formula;
pub use report::{render_collatz, render_report};

//! Doubling overflow simulation for Bitwrap.
//!
//! The simulator runs two sequences side by side: the exact doubling of a
//! start value, and the same doubling performed inside a fixed-width
//! [`Register`](bitwrap_register::Register). It reports the first index where
//! they disagree.
//!
//! # Example
//!
//! ```rust
//! use bitwrap_register::{Register, SimulationConfig};
//! use bitwrap_sim::Simulator;
//!
//! let config = SimulationConfig::new(Register::U64, 1, 100).unwrap();
//! let result = Simulator::new().simulate(&config).unwrap();
//! assert_eq!(result.divergence_index, Some(64));
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod analysis;
pub mod collatz;
pub mod error;
pub mod result;
pub mod simulator;

pub use analysis::{analyze, binary, predict_divergence, Divergence, OverflowAnalysis};
pub use collatz::{collatz, CollatzResult, MAX_COLLATZ_STEPS};
pub use error::{Error, Result};
pub use result::SimulationResult;
pub use simulator::{simulate, Simulator};

//! Fixed-width register model for Bitwrap.
//!
//! This crate provides:
//! - A typed [`Register`] (bit width plus signedness) with range queries
//! - Two's-complement wraparound via [`wrap`]
//! - Validated [`SimulationConfig`] values and the built-in [`Preset`]s
//!
//! # Example
//!
//! ```rust
//! use bitwrap_register::{wrap, Register};
//! use num_bigint::BigInt;
//!
//! let int32: Register = "i32".parse().unwrap();
//! let wrapped = wrap(&BigInt::from(1u64 << 31), int32);
//! assert_eq!(wrapped, BigInt::from(i32::MIN));
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod decimal;
pub mod error;
pub mod register;

pub use config::{Preset, SimulationConfig, MAX_ITERATIONS};
pub use error::{Error, Result};
pub use register::{wrap, Register, MAX_BITS};

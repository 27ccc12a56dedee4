//! Simulation configuration and built-in presets.

use crate::error::{Error, Result};
use crate::register::Register;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest iteration count accepted, bounding memory use.
pub const MAX_ITERATIONS: usize = 10_000;

/// Parameters of one doubling simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Register the wrapped sequence lives in.
    pub register: Register,
    /// Value at iteration 0.
    #[serde(with = "crate::decimal")]
    pub start_value: BigInt,
    /// Length of both sequences.
    pub iterations: usize,
}

impl SimulationConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the iteration count is out
    /// of range or the start value does not fit the register.
    pub fn new(register: Register, start_value: impl Into<BigInt>, iterations: usize) -> Result<Self> {
        let config = Self {
            register,
            start_value: start_value.into(),
            iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every invariant of the configuration.
    ///
    /// Fields are public, so this runs again before each simulation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::invalid("iteration count must be positive"));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(Error::invalid(format!(
                "iteration count {} exceeds maximum {MAX_ITERATIONS}",
                self.iterations
            )));
        }
        if !self.register.contains(&self.start_value) {
            return Err(Error::invalid(format!(
                "start value {} does not fit in {} (range {}..={})",
                self.start_value,
                self.register,
                self.register.min(),
                self.register.max()
            )));
        }
        Ok(())
    }
}

/// Canned configurations reproducing the classic demonstrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Unsigned 64-bit doubling from 1 over 100 iterations.
    LongLong,
    /// Signed 32-bit doubling from 1 over 40 iterations.
    Int32,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Self; 2] = [Self::LongLong, Self::Int32];

    /// Register used by the preset.
    pub const fn register(self) -> Register {
        match self {
            Self::LongLong => Register::U64,
            Self::Int32 => Register::I32,
        }
    }

    /// Iteration count used by the preset.
    pub const fn iterations(self) -> usize {
        match self {
            Self::LongLong => 100,
            Self::Int32 => 40,
        }
    }

    /// Builds the preset's configuration.
    pub fn config(self) -> SimulationConfig {
        SimulationConfig {
            register: self.register(),
            start_value: BigInt::from(1),
            iterations: self.iterations(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongLong => write!(f, "long-long"),
            Self::Int32 => write!(f, "int32"),
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long-long" | "longlong" | "u64" => Ok(Self::LongLong),
            "int32" | "int" | "i32" => Ok(Self::Int32),
            _ => Err(Error::UnknownPreset(s.to_string())),
        }
    }
}

//! Fixed-width register model.
//!
//! A [`Register`] is a bit width paired with a signedness flag. Values held
//! in a register are ordinary [`BigInt`]s that always lie inside the range
//! the register can represent; [`wrap`] reduces any integer into that range
//! the way a hardware register truncates.

use crate::error::{Error, Result};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Widest register accepted.
pub const MAX_BITS: u32 = 4096;

/// A fixed-width integer register.
///
/// Serialized as its name (`u64`, `i32`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Register {
    bits: u32,
    signed: bool,
}

impl Register {
    /// Creates a register, validating the bit width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `bits` is zero or exceeds
    /// [`MAX_BITS`].
    pub fn new(bits: u32, signed: bool) -> Result<Self> {
        if bits == 0 {
            return Err(Error::invalid("bit width must be positive"));
        }
        if bits > MAX_BITS {
            return Err(Error::invalid(format!(
                "bit width {bits} exceeds maximum {MAX_BITS}"
            )));
        }
        Ok(Self { bits, signed })
    }

    /// Creates an unsigned register.
    ///
    /// # Errors
    ///
    /// See [`Register::new`].
    pub fn unsigned(bits: u32) -> Result<Self> {
        Self::new(bits, false)
    }

    /// Creates a signed (two's-complement) register.
    ///
    /// # Errors
    ///
    /// See [`Register::new`].
    pub fn signed(bits: u32) -> Result<Self> {
        Self::new(bits, true)
    }

    /// C `int`.
    pub const I32: Self = Self {
        bits: 32,
        signed: true,
    };

    /// C `long long`.
    pub const I64: Self = Self {
        bits: 64,
        signed: true,
    };

    /// C `unsigned long long`.
    pub const U64: Self = Self {
        bits: 64,
        signed: false,
    };

    /// Returns the bit width.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns true for two's-complement registers.
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Returns `2^bits`.
    pub fn modulus(&self) -> BigInt {
        BigInt::one() << self.bits
    }

    /// Returns `2^(bits-1)`, the first value whose top bit is set.
    pub fn half(&self) -> BigInt {
        BigInt::one() << (self.bits - 1)
    }

    /// Smallest representable value.
    pub fn min(&self) -> BigInt {
        if self.signed {
            -self.half()
        } else {
            BigInt::zero()
        }
    }

    /// Largest representable value.
    pub fn max(&self) -> BigInt {
        if self.signed {
            self.half() - 1u32
        } else {
            self.modulus() - 1u32
        }
    }

    /// Returns true if `value` is representable without truncation.
    pub fn contains(&self, value: &BigInt) -> bool {
        *value >= self.min() && *value <= self.max()
    }

    /// Reduces `value` into this register. See [`wrap`].
    pub fn wrap(&self, value: &BigInt) -> BigInt {
        wrap(value, *self)
    }
}

/// Truncates `value` to the register's width with two's-complement semantics.
///
/// The value is reduced modulo `2^bits` into `[0, 2^bits)`. For signed
/// registers the upper half of that range is reinterpreted as negative by
/// subtracting `2^bits`.
pub fn wrap(value: &BigInt, register: Register) -> BigInt {
    let modulus = register.modulus();
    let truncated = value.mod_floor(&modulus);
    if register.signed && truncated >= register.half() {
        truncated - modulus
    } else {
        truncated
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.signed { 'i' } else { 'u' };
        write!(f, "{prefix}{}", self.bits)
    }
}

impl FromStr for Register {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();

        // C spellings used by the scripts this models
        match normalized.as_str() {
            "int" => return Ok(Self::I32),
            "unsigned" | "unsigned int" => return Self::unsigned(32),
            "long long" | "longlong" => return Ok(Self::I64),
            "unsigned long long" => return Ok(Self::U64),
            _ => {}
        }

        let mut chars = normalized.chars();
        let signed = match chars.next() {
            Some('i') => true,
            Some('u') => false,
            Some(_) => return Err(Error::register(s, "expected 'i' or 'u' prefix")),
            None => return Err(Error::register(s, "empty register name")),
        };

        let bits: u32 = chars
            .as_str()
            .parse()
            .map_err(|_| Error::register(s, "expected a bit width after the prefix"))?;

        Self::new(bits, signed).map_err(|e| Error::register(s, e.to_string()))
    }
}

impl From<Register> for String {
    fn from(register: Register) -> Self {
        register.to_string()
    }
}

impl TryFrom<String> for Register {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

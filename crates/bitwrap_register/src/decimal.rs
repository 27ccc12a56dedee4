//! Serde helpers that carry [`BigInt`] values as decimal strings.
//!
//! Use with `#[serde(with = "bitwrap_register::decimal")]`. Deserialization
//! also accepts plain integers so hand-written config files can say
//! `start_value: 1`.

use num_bigint::BigInt;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

/// Serializes a [`BigInt`] as a decimal string.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Deserializes a [`BigInt`] from a decimal string or an integer.
///
/// # Errors
///
/// Fails if the input is neither an integer nor a decimal string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
    deserializer.deserialize_any(DecimalVisitor)
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = BigInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal integer string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigInt, E> {
        v.trim()
            .parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

#[derive(Deserialize)]
struct Decimal(#[serde(with = "crate::decimal")] BigInt);

/// Sequence form: `Vec<BigInt>` as a list of decimal strings.
pub mod vec {
    use super::Decimal;
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes each element as a decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(values: &[BigInt], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(ToString::to_string))
    }

    /// Deserializes a list of integers or decimal strings.
    ///
    /// # Errors
    ///
    /// Fails if any element is not an integer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<BigInt>, D::Error> {
        let values = Vec::<Decimal>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|d| d.0).collect())
    }
}

/// Optional form: `Option<BigInt>` as a decimal string or null.
pub mod option {
    use super::Decimal;
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes `Some` as a decimal string and `None` as null.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional integer or decimal string.
    ///
    /// # Errors
    ///
    /// Fails if a present value is not an integer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BigInt>, D::Error> {
        let value = Option::<Decimal>::deserialize(deserializer)?;
        Ok(value.map(|d| d.0))
    }
}

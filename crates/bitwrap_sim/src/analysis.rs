//! Overflow analysis over a finished simulation.
//!
//! Extracts the facts a reader wants about the overflow point: what the
//! value was just before, what the register held instead of the exact
//! value, where the sign first flipped, and when every set bit had been
//! shifted out of the register.

use crate::result::SimulationResult;
use bitwrap_register::Register;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

/// The first position where the register disagrees with exact arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    /// Iteration at which the values first differ.
    pub index: usize,
    /// Last value both sequences agreed on.
    #[serde(with = "bitwrap_register::decimal")]
    pub exact_before: BigInt,
    /// Exact value at `index`.
    #[serde(with = "bitwrap_register::decimal")]
    pub exact: BigInt,
    /// Register value at `index`.
    #[serde(with = "bitwrap_register::decimal")]
    pub wrapped: BigInt,
}

/// Summary of how and where a simulation overflowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowAnalysis {
    /// Divergence details, if the register overflowed in range.
    pub divergence: Option<Divergence>,
    /// Divergence index computed without simulating. May lie beyond the
    /// simulated range.
    pub predicted_divergence: Option<usize>,
    /// First index holding a negative register value.
    pub first_negative: Option<usize>,
    /// Index from which every remaining register value is zero.
    pub collapse_index: Option<usize>,
    /// Sum of register values from index 0 through the divergence index.
    #[serde(with = "bitwrap_register::decimal::option", default)]
    pub sum_through_divergence: Option<BigInt>,
}

/// Analyzes a simulation result.
pub fn analyze(result: &SimulationResult) -> OverflowAnalysis {
    let divergence = result.divergence_index.map(|index| Divergence {
        index,
        exact_before: result.exact[index - 1].clone(),
        exact: result.exact[index].clone(),
        wrapped: result.wrapped[index].clone(),
    });

    let first_negative = result.wrapped.iter().position(|v| v.sign() == Sign::Minus);

    let collapse_index = match result.wrapped.iter().rposition(|v| !v.is_zero()) {
        None => Some(0),
        Some(last) if last + 1 < result.len() => Some(last + 1),
        Some(_) => None,
    };

    let sum_through_divergence = result
        .divergence_index
        .map(|d| result.wrapped[..=d].iter().sum::<BigInt>());

    OverflowAnalysis {
        divergence,
        predicted_divergence: predict_divergence(&result.config.start_value, result.config.register),
        first_negative,
        collapse_index,
        sum_through_divergence,
    }
}

/// Smallest `i >= 1` for which `start * 2^i` no longer fits `register`.
///
/// Returns `None` for a zero start, which never overflows. Assumes `start`
/// itself fits the register.
pub fn predict_divergence(start: &BigInt, register: Register) -> Option<usize> {
    if start.is_zero() {
        return None;
    }

    let magnitude = start.abs();
    let bound = if start.is_positive() {
        register.max()
    } else {
        -register.min()
    };

    // Shifting to the bound's bit length overshoots by at most one step.
    let mut shift = usize::try_from(bound.bits().saturating_sub(magnitude.bits()))
        .ok()?
        .max(1);
    while (&magnitude << shift) <= bound {
        shift += 1;
    }
    Some(shift)
}

/// Renders a value in `0b` notation, with a leading `-` for negatives.
pub fn binary(value: &BigInt) -> String {
    format!("{value:#b}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::simulate;
    use bitwrap_register::SimulationConfig;
    use proptest::prelude::*;

    fn analyzed(register: Register, start: i64, iterations: usize) -> OverflowAnalysis {
        let config = SimulationConfig::new(register, start, iterations).unwrap();
        analyze(&simulate(&config).unwrap())
    }

    #[test]
    fn long_long_overflow_details() {
        let analysis = analyzed(Register::U64, 1, 100);
        let divergence = analysis.divergence.unwrap();
        assert_eq!(divergence.index, 64);
        assert_eq!(divergence.exact_before, BigInt::from(1u64 << 63));
        assert_eq!(divergence.exact, BigInt::from(1u128 << 64));
        assert!(divergence.wrapped.is_zero());
        assert_eq!(analysis.first_negative, None);
        assert_eq!(analysis.collapse_index, Some(64));
        assert_eq!(analysis.predicted_divergence, Some(64));
    }

    #[test]
    fn int32_sum_matches_script_output() {
        let analysis = analyzed(Register::I32, 1, 40);
        assert_eq!(analysis.first_negative, Some(31));
        // 2^0 + ... + 2^30 + (-2^31)
        assert_eq!(analysis.sum_through_divergence, Some(BigInt::from(-1)));
        assert_eq!(analysis.collapse_index, Some(32));
    }

    #[test]
    fn no_overflow_in_range() {
        let analysis = analyzed(Register::I32, 1, 20);
        assert!(analysis.divergence.is_none());
        assert_eq!(analysis.sum_through_divergence, None);
        assert_eq!(analysis.collapse_index, None);
        assert_eq!(analysis.predicted_divergence, Some(31));
    }

    #[test]
    fn predicts_negative_starts() {
        let i8r = Register::signed(8).unwrap();
        assert_eq!(predict_divergence(&BigInt::from(-3), i8r), Some(6));
        // -64 * 2 = -128 still fits
        assert_eq!(predict_divergence(&BigInt::from(-64), i8r), Some(2));
        assert_eq!(predict_divergence(&BigInt::from(-128), i8r), Some(1));
        assert_eq!(predict_divergence(&BigInt::from(0), i8r), None);
    }

    #[test]
    fn binary_matches_python_bin() {
        assert_eq!(binary(&BigInt::from(5)), "0b101");
        assert_eq!(binary(&BigInt::from(-5)), "-0b101");
        assert_eq!(binary(&BigInt::from(0)), "0b0");
    }

    proptest! {
        #[test]
        fn prediction_matches_scan(
            start in -500i64..500,
            bits in 10u32..=48,
            signed in any::<bool>(),
        ) {
            let start = if signed { start } else { start.abs() };
            let register = Register::new(bits, signed).unwrap();
            let analysis = analyzed(register, start, 80);
            let scanned = analysis.divergence.as_ref().map(|d| d.index);
            match (scanned, analysis.predicted_divergence) {
                (Some(s), p) => prop_assert_eq!(Some(s), p),
                (None, Some(p)) => prop_assert!(p >= 80),
                (None, None) => prop_assert_eq!(start, 0),
            }
        }
    }
}

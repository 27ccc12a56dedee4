//! Collatz (hailstone) trajectories inside a fixed-width register.
//!
//! The `3n + 1` step grows values quickly, so a register the size of C's
//! `long long` can overflow on long trajectories. Both the exact trajectory
//! and the register's trajectory are traced until they reach 1 or exhaust
//! the step budget. A wrapped trajectory that turns negative usually falls
//! into a negative cycle and never reaches 1.

use crate::error::{Error, Result};
use crate::simulator::find_divergence;
use bitwrap_register::{wrap, Register};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest step budget accepted.
pub const MAX_COLLATZ_STEPS: usize = 1_000_000;

/// Exact and wrapped Collatz trajectories from one start value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollatzResult {
    /// Register the wrapped trajectory lives in.
    pub register: Register,
    /// Starting value.
    #[serde(with = "bitwrap_register::decimal")]
    pub start: BigInt,
    /// Exact trajectory, including the start.
    #[serde(with = "bitwrap_register::decimal::vec")]
    pub exact: Vec<BigInt>,
    /// Register trajectory, including the start.
    #[serde(with = "bitwrap_register::decimal::vec")]
    pub wrapped: Vec<BigInt>,
    /// First index where the trajectories differ.
    pub divergence_index: Option<usize>,
    /// Whether the exact trajectory reached 1 within the budget.
    pub exact_reached_one: bool,
    /// Whether the register trajectory reached 1 within the budget.
    pub wrapped_reached_one: bool,
}

impl CollatzResult {
    /// Steps taken by the exact trajectory.
    pub fn exact_steps(&self) -> usize {
        self.exact.len() - 1
    }

    /// Peak of the exact trajectory.
    pub fn exact_peak(&self) -> &BigInt {
        self.exact.iter().max().unwrap_or(&self.start)
    }
}

/// Traces the Collatz trajectory of `start`, exactly and inside `register`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `start` is below 1 or does not
/// fit the register, or if `max_steps` is zero or above
/// [`MAX_COLLATZ_STEPS`].
pub fn collatz(start: &BigInt, register: Register, max_steps: usize) -> Result<CollatzResult> {
    if !start.is_positive() {
        return Err(Error::InvalidConfiguration(format!(
            "collatz start must be at least 1, got {start}"
        )));
    }
    if !register.contains(start) {
        return Err(Error::InvalidConfiguration(format!(
            "collatz start {start} does not fit in {register}"
        )));
    }
    if max_steps == 0 || max_steps > MAX_COLLATZ_STEPS {
        return Err(Error::InvalidConfiguration(format!(
            "step budget must be in 1..={MAX_COLLATZ_STEPS}, got {max_steps}"
        )));
    }

    let (exact, exact_reached_one) = trajectory(start, max_steps, |n| n * 3u32 + 1u32);
    let (wrapped, wrapped_reached_one) =
        trajectory(start, max_steps, |n| wrap(&(n * 3u32 + 1u32), register));
    let divergence_index = find_divergence(&exact, &wrapped);

    debug!(
        register = %register,
        start = %start,
        exact_steps = exact.len() - 1,
        wrapped_steps = wrapped.len() - 1,
        divergence = ?divergence_index,
        "traced collatz trajectory"
    );

    Ok(CollatzResult {
        register,
        start: start.clone(),
        exact,
        wrapped,
        divergence_index,
        exact_reached_one,
        wrapped_reached_one,
    })
}

/// Follows the trajectory until it hits 1 or takes `max_steps` steps.
///
/// Even values halve (truncating toward zero, like C); odd values go through
/// `odd_step`.
fn trajectory(
    start: &BigInt,
    max_steps: usize,
    odd_step: impl Fn(&BigInt) -> BigInt,
) -> (Vec<BigInt>, bool) {
    let mut values = vec![start.clone()];
    let mut current = start.clone();
    while !current.is_one() && values.len() <= max_steps {
        current = if current.is_even() {
            &current / 2u32
        } else {
            odd_step(&current)
        };
        values.push(current.clone());
    }
    let reached_one = current.is_one();
    (values, reached_one)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: i64, register: Register, max_steps: usize) -> CollatzResult {
        collatz(&BigInt::from(start), register, max_steps).unwrap()
    }

    #[test]
    fn twenty_seven_fits_long_long() {
        let result = run(27, Register::I64, 10_000);
        assert_eq!(result.exact_steps(), 111);
        assert_eq!(result.exact_peak(), &BigInt::from(9232));
        assert_eq!(result.divergence_index, None);
        assert!(result.exact_reached_one);
        assert!(result.wrapped_reached_one);
        assert_eq!(result.exact, result.wrapped);
    }

    #[test]
    fn twenty_seven_overflows_eight_bits() {
        let result = run(27, Register::signed(8).unwrap(), 10_000);
        // 47 * 3 + 1 = 142 does not fit i8
        assert_eq!(result.divergence_index, Some(8));
        assert_eq!(result.exact[8], BigInt::from(142));
        assert_eq!(result.wrapped[8], BigInt::from(-114));
        assert_eq!(result.wrapped[9], BigInt::from(-57));
        assert_eq!(result.wrapped[10], BigInt::from(86));
        assert!(result.exact_reached_one);
        assert!(result.wrapped_reached_one);
    }

    #[test]
    fn one_is_already_done() {
        let result = run(1, Register::I64, 5);
        assert_eq!(result.exact_steps(), 0);
        assert!(result.exact_reached_one);
    }

    #[test]
    fn step_budget_is_respected() {
        let result = run(27, Register::I64, 10);
        assert_eq!(result.exact.len(), 11);
        assert!(!result.exact_reached_one);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(collatz(&BigInt::from(0), Register::I64, 10)
            .unwrap_err()
            .is_invalid_configuration());
        assert!(collatz(&BigInt::from(200), Register::signed(8).unwrap(), 10).is_err());
        assert!(collatz(&BigInt::from(7), Register::I64, 0).is_err());
        assert!(collatz(&BigInt::from(7), Register::I64, MAX_COLLATZ_STEPS + 1).is_err());
    }
}

//! The doubling simulator.

use crate::error::{Error, Result};
use crate::result::SimulationResult;
use bitwrap_register::{wrap, SimulationConfig, MAX_ITERATIONS};
use num_bigint::BigInt;
use tracing::debug;

/// Runs doubling simulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulator {
    max_iterations: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a simulator accepting up to [`MAX_ITERATIONS`] iterations.
    pub const fn new() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Creates a simulator with a tighter iteration cap.
    ///
    /// Caps above [`MAX_ITERATIONS`] are clamped to it.
    pub fn with_limit(max_iterations: usize) -> Self {
        Self {
            max_iterations: max_iterations.min(MAX_ITERATIONS),
        }
    }

    /// Returns the iteration cap.
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Doubles the start value `iterations - 1` times, both exactly and
    /// inside the configured register.
    ///
    /// # Errors
    ///
    /// Returns an invalid configuration error if the config fails validation
    /// or asks for more iterations than this simulator allows.
    pub fn simulate(&self, config: &SimulationConfig) -> Result<SimulationResult> {
        config.validate()?;
        if config.iterations > self.max_iterations {
            return Err(Error::InvalidConfiguration(format!(
                "iteration count {} exceeds simulator limit {}",
                config.iterations, self.max_iterations
            )));
        }

        let register = config.register;
        let mut exact = Vec::with_capacity(config.iterations);
        let mut wrapped = Vec::with_capacity(config.iterations);
        exact.push(config.start_value.clone());
        wrapped.push(config.start_value.clone());

        for i in 1..config.iterations {
            let next_exact: BigInt = &exact[i - 1] * 2u32;
            let next_wrapped = wrap(&(&wrapped[i - 1] * 2u32), register);
            exact.push(next_exact);
            wrapped.push(next_wrapped);
        }

        let divergence_index = find_divergence(&exact, &wrapped);

        debug!(
            register = %register,
            start = %config.start_value,
            iterations = config.iterations,
            divergence = ?divergence_index,
            "simulated doubling"
        );

        Ok(SimulationResult {
            config: config.clone(),
            exact,
            wrapped,
            divergence_index,
        })
    }
}

/// Simulates with the default [`Simulator`].
///
/// # Errors
///
/// See [`Simulator::simulate`].
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult> {
    Simulator::new().simulate(config)
}

/// First index `i >= 1` where the two sequences disagree.
///
/// Index 0 is the shared start value and is never reported.
pub fn find_divergence(exact: &[BigInt], wrapped: &[BigInt]) -> Option<usize> {
    exact
        .iter()
        .zip(wrapped)
        .enumerate()
        .skip(1)
        .find(|(_, (e, w))| e != w)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitwrap_register::{Preset, Register};
    use num_traits::Zero;
    use proptest::prelude::*;

    fn run(register: Register, start: i64, iterations: usize) -> SimulationResult {
        let config = SimulationConfig::new(register, start, iterations).unwrap();
        simulate(&config).unwrap()
    }

    #[test]
    fn unsigned_64_wraps_to_zero_at_64() {
        let result = run(Register::U64, 1, 100);
        assert_eq!(result.divergence_index, Some(64));
        assert_eq!(result.exact[63], BigInt::from(1u64 << 63));
        assert_eq!(result.wrapped[63], BigInt::from(1u64 << 63));
        assert!(result.wrapped[64].is_zero());
        assert_eq!(result.exact[64], BigInt::from(1u128 << 64));
        assert_eq!(result.len(), 100);
    }

    #[test]
    fn signed_32_flips_negative_at_31() {
        let result = run(Register::I32, 1, 40);
        assert_eq!(result.divergence_index, Some(31));
        assert_eq!(result.wrapped[31], BigInt::from(i32::MIN));
        assert!(result.wrapped[32].is_zero());
    }

    #[test]
    fn signed_8_sequence() {
        let result = run(Register::signed(8).unwrap(), 1, 10);
        let expected: Vec<BigInt> = [1, 2, 4, 8, 16, 32, 64, -128, 0, 0]
            .into_iter()
            .map(BigInt::from)
            .collect();
        assert_eq!(result.wrapped, expected);
        assert_eq!(result.divergence_index, Some(7));
    }

    #[test]
    fn single_iteration_never_diverges() {
        let result = run(Register::signed(8).unwrap(), 127, 1);
        assert_eq!(result.len(), 1);
        assert_eq!(result.divergence_index, None);
    }

    #[test]
    fn zero_start_never_diverges() {
        let result = run(Register::unsigned(3).unwrap(), 0, 50);
        assert_eq!(result.divergence_index, None);
        assert!(result.wrapped.iter().all(Zero::is_zero));
    }

    #[test]
    fn negative_start_in_signed_register() {
        // -3 * 2^i leaves i8 at i = 6 (-192)
        let result = run(Register::signed(8).unwrap(), -3, 10);
        assert_eq!(result.divergence_index, Some(6));
        assert_eq!(result.wrapped[6], BigInt::from(64));
    }

    #[test]
    fn presets_reproduce_classic_runs() {
        let long_long = simulate(&Preset::LongLong.config()).unwrap();
        assert_eq!(long_long.divergence_index, Some(64));
        let int32 = simulate(&Preset::Int32.config()).unwrap();
        assert_eq!(int32.divergence_index, Some(31));
    }

    #[test]
    fn rejects_invalid_configs() {
        let mut config = SimulationConfig::new(Register::I32, 1, 10).unwrap();
        config.iterations = 0;
        assert!(simulate(&config).unwrap_err().is_invalid_configuration());

        config.iterations = 10;
        config.start_value = BigInt::from(1u64 << 40);
        assert!(simulate(&config).unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn simulator_limit_is_enforced() {
        let config = SimulationConfig::new(Register::I32, 1, 100).unwrap();
        let simulator = Simulator::with_limit(50);
        assert!(simulator.simulate(&config).is_err());
        assert_eq!(Simulator::with_limit(usize::MAX).max_iterations(), MAX_ITERATIONS);
    }

    #[test]
    fn find_divergence_ignores_index_zero() {
        let a = vec![BigInt::from(1), BigInt::from(2)];
        let b = vec![BigInt::from(9), BigInt::from(2)];
        assert_eq!(find_divergence(&a, &b), None);
    }

    proptest! {
        #[test]
        fn exact_sequence_is_pure_doubling(
            start in -1000i64..1000,
            bits in 12u32..=40,
            iterations in 1usize..120,
        ) {
            let result = run(Register::signed(bits).unwrap(), start, iterations);
            for (i, value) in result.exact.iter().enumerate() {
                prop_assert_eq!(value, &(BigInt::from(start) << i));
            }
        }

        #[test]
        fn divergence_is_permanent(
            start in 0i64..128,
            bits in 8u32..=24,
            signed in any::<bool>(),
            iterations in 1usize..80,
        ) {
            let register = Register::new(bits, signed).unwrap();
            let result = run(register, start, iterations);
            match result.divergence_index {
                Some(d) => {
                    for i in 0..result.len() {
                        prop_assert_eq!(i < d, result.exact[i] == result.wrapped[i]);
                    }
                }
                None => prop_assert_eq!(&result.exact, &result.wrapped),
            }
            for value in &result.wrapped {
                prop_assert!(register.contains(value));
            }
        }
    }
}

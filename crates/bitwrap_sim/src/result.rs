//! Simulation result types.

use bitwrap_register::SimulationConfig;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Outcome of one doubling simulation.
///
/// Both sequences have exactly `config.iterations` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Configuration that produced this result.
    pub config: SimulationConfig,
    /// Unlimited-precision doubling: `start * 2^i`.
    #[serde(with = "bitwrap_register::decimal::vec")]
    pub exact: Vec<BigInt>,
    /// Doubling inside the register.
    #[serde(with = "bitwrap_register::decimal::vec")]
    pub wrapped: Vec<BigInt>,
    /// First index `i >= 1` where the sequences differ.
    pub divergence_index: Option<usize>,
}

/// One position of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// Iteration number.
    pub index: usize,
    /// Exact value.
    pub exact: &'a BigInt,
    /// Wrapped value.
    pub wrapped: &'a BigInt,
    /// Whether the wrapped value has left the exact sequence.
    pub diverged: bool,
}

impl SimulationResult {
    /// Number of iterations simulated.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    /// Returns true if no iterations were simulated.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Returns true if the register overflowed within the simulated range.
    pub const fn diverged(&self) -> bool {
        self.divergence_index.is_some()
    }

    /// Returns true if `index` is at or past the divergence point.
    pub fn is_diverged_at(&self, index: usize) -> bool {
        self.divergence_index.is_some_and(|d| index >= d)
    }

    /// Iterates over every step in order.
    pub fn steps(&self) -> impl Iterator<Item = Step<'_>> {
        self.exact
            .iter()
            .zip(&self.wrapped)
            .enumerate()
            .map(|(index, (exact, wrapped))| Step {
                index,
                exact,
                wrapped,
                diverged: self.is_diverged_at(index),
            })
    }

    /// Steps within `before` positions ahead of and `after` positions past
    /// the divergence point. Empty when there is no divergence.
    pub fn window(&self, before: usize, after: usize) -> Vec<Step<'_>> {
        let Some(d) = self.divergence_index else {
            return Vec::new();
        };
        let start = d.saturating_sub(before);
        let end = d.saturating_add(after).min(self.len());
        self.steps().skip(start).take(end - start).collect()
    }
}

//! Categorical sampling and the optional initial-state distribution

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ids::StateId;
use crate::error::ConfigError;

/// Maximum distance from 1 an initial distribution may sum to before it is rejected
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Draw an index from `weights` by inverting the cumulative distribution.
///
/// Weights need not be normalized. Zero-weight entries are never selected.
/// Returns `None` when no entry has positive weight.
pub fn sample_categorical<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let target = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        if *w <= 0.0 {
            continue;
        }
        cumulative += w;
        if target < cumulative {
            return Some(i);
        }
    }

    // Rounding can leave `target` just past the final cumulative sum
    weights.iter().rposition(|w| *w > 0.0)
}

/// Probability vector over a state space, used to draw each trial's initial state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialDistribution {
    probabilities: Vec<f64>,
}

impl InitialDistribution {
    /// Validate `probabilities` against a state space of `num_states` labels.
    ///
    /// A sum within [`DISTRIBUTION_TOLERANCE`] of 1 is renormalized to exactly 1.
    pub fn new(probabilities: Vec<f64>, num_states: usize) -> Result<Self, ConfigError> {
        if probabilities.len() != num_states {
            return Err(ConfigError::DistributionLength {
                expected: num_states,
                actual: probabilities.len(),
            });
        }

        if let Some((index, value)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(ConfigError::InvalidProbability {
                index,
                value: *value,
            });
        }

        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(ConfigError::DistributionSum {
                sum,
                tolerance: DISTRIBUTION_TOLERANCE,
            });
        }

        Ok(Self {
            probabilities: probabilities.into_iter().map(|p| p / sum).collect(),
        })
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StateId {
        // The sum check in `new` guarantees at least one positive entry
        let index = sample_categorical(&self.probabilities, rng).unwrap_or(0);
        StateId(index as u16)
    }
}

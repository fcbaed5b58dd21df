//! Run configuration
//!
//! `SimulationConfig` holds the four user-facing knobs of a run plus an
//! optional seed. `Default` reproduces the three-state weather example:
//!
//! ```
//! use chainsim_core::config::SimulationConfig;
//!
//! let config = SimulationConfig::default()
//!     .with_trials(1_000)
//!     .with_horizon(7)
//!     .with_seed(42);
//!
//! assert_eq!(config.states, ["Sunny", "Cloudy", "Rainy"]);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{InitialDistribution, StateSpace};

fn default_states() -> Vec<String> {
    vec!["Sunny".into(), "Cloudy".into(), "Rainy".into()]
}

fn default_initial_distribution() -> Option<Vec<f64>> {
    Some(vec![0.5, 0.3, 0.2])
}

fn default_trial_count() -> usize {
    100_000
}

fn default_horizon() -> usize {
    30
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ordered state labels; order fixes the transition matrix rows
    #[serde(default = "default_states")]
    pub states: Vec<String>,

    /// Probability of starting in each state. `None` draws the initial state uniformly.
    #[serde(default = "default_initial_distribution")]
    pub initial_distribution: Option<Vec<f64>>,

    #[serde(default = "default_trial_count")]
    pub trial_count: usize,

    /// Days simulated per trial, including the initial day
    #[serde(default = "default_horizon")]
    pub horizon: usize,

    /// Master seed. `None` picks one at random when the run starts.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            states: default_states(),
            initial_distribution: default_initial_distribution(),
            trial_count: default_trial_count(),
            horizon: default_horizon(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_initial_distribution(mut self, probabilities: Vec<f64>) -> Self {
        self.initial_distribution = Some(probabilities);
        self
    }

    /// Draw every trial's initial state uniformly
    #[must_use]
    pub fn with_uniform_initial(mut self) -> Self {
        self.initial_distribution = None;
        self
    }

    #[must_use]
    pub fn with_trials(mut self, trial_count: usize) -> Self {
        self.trial_count = trial_count;
        self
    }

    #[must_use]
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field and resolve the state space and initial distribution
    pub fn validate(&self) -> Result<RunPlan, ConfigError> {
        let states = StateSpace::new(self.states.iter().cloned())?;

        if self.trial_count == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }

        let initial = self
            .initial_distribution
            .clone()
            .map(|p| InitialDistribution::new(p, states.len()))
            .transpose()?;

        Ok(RunPlan {
            states,
            initial,
            trial_count: self.trial_count,
            horizon: self.horizon,
        })
    }
}

/// A validated configuration, shared read-only by every trial
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub states: StateSpace,
    pub initial: Option<InitialDistribution>,
    pub trial_count: usize,
    pub horizon: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_weather_example() {
        let config = SimulationConfig::default();
        assert_eq!(config.states, ["Sunny", "Cloudy", "Rainy"]);
        assert_eq!(config.initial_distribution, Some(vec![0.5, 0.3, 0.2]));
        assert_eq!(config.trial_count, 100_000);
        assert_eq!(config.horizon, 30);
        assert_eq!(config.seed, None);

        let plan = config.validate().unwrap();
        assert_eq!(plan.states.len(), 3);
        assert!(plan.initial.is_some());
    }

    #[test]
    fn test_validate_rejects_bad_counts() {
        let zero_trials = SimulationConfig::default().with_trials(0);
        assert_eq!(zero_trials.validate().unwrap_err(), ConfigError::ZeroTrials);

        let zero_horizon = SimulationConfig::default().with_horizon(0);
        assert_eq!(zero_horizon.validate().unwrap_err(), ConfigError::ZeroHorizon);
    }

    #[test]
    fn test_validate_rejects_mismatched_distribution() {
        let config = SimulationConfig::default().with_states(["A", "B"]);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::DistributionLength {
                expected: 2,
                actual: 3
            }
        );

        let uniform = SimulationConfig::default()
            .with_states(["A", "B"])
            .with_uniform_initial();
        assert!(uniform.validate().unwrap().initial.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_states() {
        let config = SimulationConfig::default()
            .with_states(Vec::<String>::new())
            .with_uniform_initial();
        assert_eq!(config.validate().unwrap_err(), ConfigError::EmptyStates);
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: SimulationConfig = serde_json::from_str(r#"{"trial_count": 10}"#).unwrap();
        assert_eq!(config.trial_count, 10);
        assert_eq!(config.horizon, 30);
        assert_eq!(config.states.len(), 3);
    }
}

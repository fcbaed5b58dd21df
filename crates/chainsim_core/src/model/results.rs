//! Simulation results
//!
//! Contains the output types from running trials: single trajectories, the
//! ordered trial set, and the occupancy statistics derived from it.

use serde::{Deserialize, Serialize};

use super::ids::StateId;
use super::states::StateSpace;
use crate::error::ConsistencyError;

/// One simulated run of the chain, one state per day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    states: Vec<StateId>,
}

impl Trajectory {
    pub fn new(states: Vec<StateId>) -> Self {
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn initial(&self) -> Option<StateId> {
        self.states.first().copied()
    }

    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    /// Resolve each day's state to its label
    pub fn labels<'a>(&self, space: &'a StateSpace) -> Result<Vec<&'a str>, ConsistencyError> {
        self.states.iter().map(|id| space.label(*id)).collect()
    }
}

/// All trajectories of a run, trial 0 first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSet {
    pub horizon: usize,
    pub trajectories: Vec<Trajectory>,
}

impl TrialSet {
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Trajectory of trial 0, the one shown as a worked example
    pub fn exemplar(&self) -> Option<&Trajectory> {
        self.trajectories.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }
}

/// Occupancy percentages derived from a [`TrialSet`].
///
/// `overall[s]` is the share of all (trial, day) slots spent in state `s`.
/// `per_day[s][d]` is the share of trials in state `s` on day `d`.
/// Both are indexed in state-space order and expressed in percent.
///
/// Series lengths always match the state space and horizon; construction and
/// deserialization both go through [`AggregateStats::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AggregateStatsData", into = "AggregateStatsData")]
pub struct AggregateStats {
    states: StateSpace,
    trial_count: usize,
    horizon: usize,
    overall: Vec<f64>,
    per_day: Vec<Vec<f64>>,
}

/// Serialized form of [`AggregateStats`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStatsData {
    states: StateSpace,
    trial_count: usize,
    horizon: usize,
    overall: Vec<f64>,
    per_day: Vec<Vec<f64>>,
}

impl TryFrom<AggregateStatsData> for AggregateStats {
    type Error = ConsistencyError;

    fn try_from(data: AggregateStatsData) -> Result<Self, Self::Error> {
        Self::new(
            data.states,
            data.trial_count,
            data.horizon,
            data.overall,
            data.per_day,
        )
    }
}

impl From<AggregateStats> for AggregateStatsData {
    fn from(stats: AggregateStats) -> Self {
        Self {
            states: stats.states,
            trial_count: stats.trial_count,
            horizon: stats.horizon,
            overall: stats.overall,
            per_day: stats.per_day,
        }
    }
}

impl AggregateStats {
    /// Check that there is one overall value and one `horizon`-day series per state
    pub fn new(
        states: StateSpace,
        trial_count: usize,
        horizon: usize,
        overall: Vec<f64>,
        per_day: Vec<Vec<f64>>,
    ) -> Result<Self, ConsistencyError> {
        let fits = overall.len() == states.len()
            && per_day.len() == states.len()
            && per_day.iter().all(|series| series.len() == horizon);
        if !fits {
            return Err(ConsistencyError::StatsShape {
                states: states.len(),
                horizon,
            });
        }

        Ok(Self {
            states,
            trial_count,
            horizon,
            overall,
            per_day,
        })
    }

    pub fn states(&self) -> &StateSpace {
        &self.states
    }

    pub fn labels(&self) -> &[String] {
        self.states.labels()
    }

    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Overall percentages in state order
    pub fn overall(&self) -> &[f64] {
        &self.overall
    }

    /// Per-day series in state order
    pub fn per_day(&self) -> &[Vec<f64>] {
        &self.per_day
    }

    pub fn overall_for(&self, label: &str) -> Option<f64> {
        let id = self.states.id_of(label).ok()?;
        self.overall.get(id.index()).copied()
    }

    pub fn per_day_for(&self, label: &str) -> Option<&[f64]> {
        let id = self.states.id_of(label).ok()?;
        self.per_day.get(id.index()).map(Vec::as_slice)
    }

    /// (label, overall percentage) pairs in state order
    pub fn iter_overall(&self) -> impl Iterator<Item = (&str, f64)> {
        self.states
            .labels()
            .iter()
            .map(String::as_str)
            .zip(self.overall.iter().copied())
    }

    /// Percentages of all states on day `day`, in state order
    pub fn day(&self, day: usize) -> Option<Vec<f64>> {
        self.per_day
            .iter()
            .map(|series| series.get(day).copied())
            .collect()
    }

    /// Lower edge of each state's band when the per-day percentages are stacked
    /// in state order. `stacked[s][d]` is the sum of `per_day[..s][d]`.
    pub fn stacked_per_day(&self) -> Vec<Vec<f64>> {
        let mut bottom = vec![0.0; self.horizon];
        let mut stacked = Vec::with_capacity(self.per_day.len());
        for series in &self.per_day {
            stacked.push(bottom.clone());
            for (b, pct) in bottom.iter_mut().zip(series) {
                *b += pct;
            }
        }
        stacked
    }
}

//! Occupancy statistics over a finished trial set

use crate::error::{ConsistencyError, Result};
use crate::model::{AggregateStats, StateSpace, TrialSet};

/// Count how often each state is occupied, overall and per day, as percentages.
///
/// Overall percentages divide by `trials * horizon` slots, per-day percentages
/// divide by the number of trials, so each sums to 100 across states.
pub fn aggregate(trials: &TrialSet, states: &StateSpace) -> Result<AggregateStats> {
    if trials.is_empty() {
        return Err(ConsistencyError::EmptyTrialSet.into());
    }

    let horizon = trials.horizon;
    let mut daily_counts = vec![vec![0u64; horizon]; states.len()];

    for (trial, trajectory) in trials.iter().enumerate() {
        if trajectory.len() != horizon {
            return Err(ConsistencyError::TrajectoryLength {
                trial,
                expected: horizon,
                actual: trajectory.len(),
            }
            .into());
        }

        for (day, state) in trajectory.states().iter().enumerate() {
            let counts = daily_counts
                .get_mut(state.index())
                .ok_or(ConsistencyError::UnknownState(*state))?;
            counts[day] += 1;
        }
    }

    let trial_count = trials.len();
    let slots = (trial_count * horizon) as f64;

    let overall = daily_counts
        .iter()
        .map(|counts| counts.iter().sum::<u64>() as f64 / slots * 100.0)
        .collect();

    let per_day = daily_counts
        .iter()
        .map(|counts| {
            counts
                .iter()
                .map(|c| *c as f64 / trial_count as f64 * 100.0)
                .collect()
        })
        .collect();

    AggregateStats::new(states.clone(), trial_count, horizon, overall, per_day)
        .map_err(Into::into)
}

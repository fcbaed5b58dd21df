use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::aggregate::aggregate;
use crate::config::{RunPlan, SimulationConfig};
use crate::error::{ConfigError, ConsistencyError, Result};
use crate::model::{
    AggregateStats, StateId, StateSpace, TransitionMatrix, Trajectory, TrialSet,
    sample_categorical,
};
use crate::transition::generate_transition_matrix;

/// Simulate one trajectory of `horizon` days starting from `initial`.
///
/// Each step samples the next state from the current state's row of `matrix`.
/// A horizon of 1 returns `[initial]` without drawing from `rng`.
pub fn simulate_chain<R: Rng + ?Sized>(
    initial: StateId,
    matrix: &TransitionMatrix,
    states: &StateSpace,
    horizon: usize,
    rng: &mut R,
) -> Result<Trajectory> {
    if horizon == 0 {
        return Err(ConfigError::ZeroHorizon.into());
    }
    if !states.contains(initial) {
        return Err(ConsistencyError::UnknownState(initial).into());
    }
    if matrix.size() != states.len() {
        return Err(ConsistencyError::MatrixShape {
            rows: matrix.size(),
            states: states.len(),
        }
        .into());
    }

    let mut history = Vec::with_capacity(horizon);
    let mut current = initial;
    history.push(current);

    for _ in 1..horizon {
        let row = matrix
            .row(current)
            .ok_or(ConsistencyError::UnknownState(current))?;
        let next = sample_categorical(row, rng).ok_or(ConsistencyError::DegenerateRow(current))?;
        current = StateId(next as u16);
        history.push(current);
    }

    Ok(Trajectory::new(history))
}

/// One independent trial: draw an initial state, a fresh matrix, then a trajectory
pub fn run_trial<R: Rng + ?Sized>(plan: &RunPlan, rng: &mut R) -> Result<Trajectory> {
    let initial = match &plan.initial {
        Some(distribution) => distribution.sample(rng),
        None => StateId(rng.random_range(0..plan.states.len()) as u16),
    };
    let matrix = generate_transition_matrix(&plan.states, rng);
    simulate_chain(initial, &matrix, &plan.states, plan.horizon, rng)
}

/// Run every trial of `config` in order, drawing all randomness from `rng`.
///
/// The configuration is validated before any trial runs.
pub fn run_trials<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<TrialSet> {
    let plan = config.validate()?;
    run_plan(&plan, rng)
}

pub fn run_plan<R: Rng + ?Sized>(plan: &RunPlan, rng: &mut R) -> Result<TrialSet> {
    let trajectories = (0..plan.trial_count)
        .map(|_| run_trial(plan, rng))
        .collect::<Result<Vec<_>>>()?;

    Ok(TrialSet {
        horizon: plan.horizon,
        trajectories,
    })
}

/// Run every trial of `config` with per-trial generators derived from `seed`.
///
/// Each trial gets its own `SmallRng` seeded from a master generator, so the
/// result depends only on `seed` whether or not trials run in parallel.
pub fn run_trials_seeded(config: &SimulationConfig, seed: u64) -> Result<TrialSet> {
    let plan = config.validate()?;
    run_plan_seeded(&plan, seed)
}

pub fn run_plan_seeded(plan: &RunPlan, seed: u64) -> Result<TrialSet> {
    let mut master = SmallRng::seed_from_u64(seed);
    let trial_seeds: Vec<u64> = (0..plan.trial_count).map(|_| master.next_u64()).collect();

    let run_seeded = |trial_seed: u64| {
        let mut rng = SmallRng::seed_from_u64(trial_seed);
        run_trial(plan, &mut rng)
    };

    #[cfg(feature = "parallel")]
    let trajectories = trial_seeds
        .into_par_iter()
        .map(run_seeded)
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let trajectories = trial_seeds
        .into_iter()
        .map(run_seeded)
        .collect::<Result<Vec<_>>>()?;

    Ok(TrialSet {
        horizon: plan.horizon,
        trajectories,
    })
}

/// Everything a finished run hands to presentation
#[derive(Debug, Clone)]
pub struct SimulationRun {
    /// Master seed the run used, so it can be repeated
    pub seed: u64,
    pub states: StateSpace,
    pub trials: TrialSet,
    pub stats: AggregateStats,
}

impl SimulationRun {
    pub fn exemplar(&self) -> Option<&Trajectory> {
        self.trials.exemplar()
    }
}

/// Validate, run all trials, and aggregate.
///
/// Uses `config.seed` when set, otherwise a random master seed.
pub fn run(config: &SimulationConfig) -> Result<SimulationRun> {
    let plan = config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);

    tracing::info!(
        trials = plan.trial_count,
        horizon = plan.horizon,
        states = plan.states.len(),
        seed,
        "starting Markov chain simulation"
    );
    let started = Instant::now();

    let trials = run_plan_seeded(&plan, seed)?;
    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "trials complete");

    let stats = aggregate(&trials, &plan.states)?;
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );

    Ok(SimulationRun {
        seed,
        states: plan.states,
        trials,
        stats,
    })
}

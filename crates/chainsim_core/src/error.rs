use std::fmt;

use crate::model::StateId;

/// Errors in a run configuration, detected before any simulation work begins
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyStates,
    DuplicateState(String),
    TooManyStates(usize),
    ZeroTrials,
    ZeroHorizon,
    DistributionLength {
        expected: usize,
        actual: usize,
    },
    InvalidProbability {
        index: usize,
        value: f64,
    },
    /// Initial distribution does not sum to 1 within `tolerance`
    DistributionSum {
        sum: f64,
        tolerance: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyStates => write!(f, "at least one state is required"),
            ConfigError::DuplicateState(label) => write!(f, "state {label:?} is listed twice"),
            ConfigError::TooManyStates(count) => {
                write!(f, "{count} states exceed the supported maximum of {}", u16::MAX)
            }
            ConfigError::ZeroTrials => write!(f, "trial count must be at least 1"),
            ConfigError::ZeroHorizon => write!(f, "horizon must be at least 1 day"),
            ConfigError::DistributionLength { expected, actual } => write!(
                f,
                "initial distribution has {actual} entries but there are {expected} states"
            ),
            ConfigError::InvalidProbability { index, value } => write!(
                f,
                "initial distribution entry {index} is not a valid probability: {value}"
            ),
            ConfigError::DistributionSum { sum, tolerance } => write!(
                f,
                "initial distribution sums to {sum}, expected 1 (tolerance {tolerance})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Broken invariants between components. These are internal faults, not user errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyError {
    UnknownState(StateId),
    UnknownLabel(String),
    /// A transition row with no positive probability
    DegenerateRow(StateId),
    MatrixShape {
        rows: usize,
        states: usize,
    },
    TrajectoryLength {
        trial: usize,
        expected: usize,
        actual: usize,
    },
    EmptyTrialSet,
    /// Aggregate statistics whose series do not match their state space and horizon
    StatsShape {
        states: usize,
        horizon: usize,
    },
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyError::UnknownState(id) => write!(f, "state {id} is not in the state space"),
            ConsistencyError::UnknownLabel(label) => {
                write!(f, "state {label:?} is not in the state space")
            }
            ConsistencyError::DegenerateRow(id) => {
                write!(f, "transition row for state {id} has no probability mass")
            }
            ConsistencyError::MatrixShape { rows, states } => write!(
                f,
                "transition matrix has {rows} rows but there are {states} states"
            ),
            ConsistencyError::TrajectoryLength {
                trial,
                expected,
                actual,
            } => write!(
                f,
                "trajectory of trial {trial} has {actual} days, expected {expected}"
            ),
            ConsistencyError::EmptyTrialSet => write!(f, "cannot aggregate an empty trial set"),
            ConsistencyError::StatsShape { states, horizon } => write!(
                f,
                "aggregate statistics do not cover {states} states over {horizon} days"
            ),
        }
    }
}

impl std::error::Error for ConsistencyError {}

/// Any failure of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Config(ConfigError),
    Consistency(ConsistencyError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "invalid configuration: {e}"),
            SimulationError::Consistency(e) => write!(f, "internal consistency fault: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Consistency(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::Config(err)
    }
}

impl From<ConsistencyError> for SimulationError {
    fn from(err: ConsistencyError) -> Self {
        SimulationError::Consistency(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

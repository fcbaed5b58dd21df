mod distribution;
mod ids;
mod matrix;
mod results;
mod states;

pub use distribution::{DISTRIBUTION_TOLERANCE, InitialDistribution, sample_categorical};
pub use ids::StateId;
pub use matrix::TransitionMatrix;
pub use results::{AggregateStats, Trajectory, TrialSet};
pub use states::StateSpace;

//! Monte Carlo estimation of Markov chain occupancy
//!
//! Every trial draws its own random row-stochastic transition matrix and an
//! initial state, then walks the chain for a fixed number of days. The
//! trajectories are aggregated into overall and per-day state percentages.
//!
//! ```
//! use chainsim_core::config::SimulationConfig;
//! use chainsim_core::simulation::run;
//!
//! let config = SimulationConfig::default()
//!     .with_trials(500)
//!     .with_horizon(10)
//!     .with_seed(7);
//!
//! let result = run(&config).unwrap();
//! let total: f64 = result.stats.overall().iter().sum();
//! assert!((total - 100.0).abs() < 1e-6);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod error;
pub mod simulation;
pub mod transition;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::SimulationConfig;
pub use error::{ConfigError, ConsistencyError, SimulationError};
pub use simulation::{SimulationRun, run, run_trials, run_trials_seeded, simulate_chain};
pub use transition::generate_transition_matrix;

//! Integration tests for the chain simulation engine
//!
//! Tests are organized by topic:
//! - `matrix_generation` - Random row-stochastic matrices
//! - `chain` - Single trajectory stepping
//! - `trials` - Trial runner, initial states, seeding
//! - `aggregation` - Overall and per-day occupancy percentages
//! - `scenarios` - End-to-end runs

mod scenarios;

//! Command-line front end for the chain simulator
//!
//! Parses arguments into a `SimulationConfig`, runs it through
//! `chainsim_core`, and renders the result as text or JSON.

pub mod cli;
pub mod logging;
pub mod report;
pub mod util;

pub use cli::Args;
pub use logging::init_logging;
pub use report::{OutputFormat, render_json, render_text};

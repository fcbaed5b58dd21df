//! Command-line arguments

use std::path::PathBuf;

use chainsim_core::config::SimulationConfig;
use clap::Parser;

use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "chainsim")]
#[command(about = "Monte Carlo estimate of Markov chain state occupancy with random transition matrices")]
pub struct Args {
    /// Ordered state labels [default: Sunny,Cloudy,Rainy]
    #[arg(short, long, value_delimiter = ',')]
    pub states: Option<Vec<String>>,

    /// Initial-state probabilities aligned with the states.
    /// Defaults to 0.5,0.3,0.2 for the default states and to uniform when --states is given.
    #[arg(short, long, value_delimiter = ',', conflicts_with = "uniform_initial")]
    pub initial: Option<Vec<f64>>,

    /// Draw every trial's initial state uniformly
    #[arg(short, long)]
    pub uniform_initial: bool,

    /// Number of independent trials
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub trials: usize,

    /// Days simulated per trial
    #[arg(short = 'd', long, alias = "days", default_value_t = 30)]
    pub horizon: usize,

    /// Master seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Width of text bar charts in characters
    #[arg(short, long, default_value_t = 50)]
    pub width: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn to_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default()
            .with_trials(self.trials)
            .with_horizon(self.horizon);

        if let Some(states) = &self.states {
            config = config.with_states(states.iter().map(|s| s.trim().to_string()));
            // The default distribution only fits the default states
            config = config.with_uniform_initial();
        }
        if let Some(initial) = &self.initial {
            config = config.with_initial_distribution(initial.clone());
        }
        if self.uniform_initial {
            config = config.with_uniform_initial();
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        config
    }
}

use std::io::Write;

use chainsim::{Args, OutputFormat, init_logging, render_json, render_text};
use chainsim_core::simulation::run;
use clap::Parser;
use color_eyre::eyre::WrapErr;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let config = args.to_config();
    tracing::debug!(?config, "resolved configuration");

    let result = run(&config).wrap_err("simulation failed")?;

    let output = match args.format {
        OutputFormat::Text => render_text(&result, args.width)?,
        OutputFormat::Json => render_json(&result, &config)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()?;

    tracing::info!(seed = result.seed, "report written");
    Ok(())
}

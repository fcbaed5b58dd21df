//! Presentation of a finished run
//!
//! Renders the three summaries of a run: overall occupancy, the exemplar
//! trajectory (trial 0), and the per-day distribution as stacked bars.
//! Text is meant for a terminal; JSON for other tools.

use std::fmt::Write;

use chainsim_core::config::SimulationConfig;
use chainsim_core::error::ConsistencyError;
use chainsim_core::simulation::SimulationRun;
use serde::Serialize;

use crate::util::format::{bar, cells_for, fit, format_percent};

/// Fill characters for stacked bars, cycled in state order
const PALETTE: [char; 8] = ['#', '=', '+', ':', '*', '%', '~', '.'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn fill_for(state: usize) -> char {
    PALETTE[state % PALETTE.len()]
}

/// Render the full text report
pub fn render_text(run: &SimulationRun, width: usize) -> color_eyre::Result<String> {
    let mut out = String::new();
    write_overall(&mut out, run, width)?;
    out.push('\n');
    write_exemplar(&mut out, run)?;
    out.push('\n');
    write_per_day(&mut out, run, width)?;
    Ok(out)
}

fn label_width(run: &SimulationRun) -> usize {
    run.stats
        .labels()
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
}

fn write_overall(out: &mut String, run: &SimulationRun, width: usize) -> color_eyre::Result<()> {
    let stats = &run.stats;
    let label_width = label_width(run);

    writeln!(
        out,
        "State occupancy over {} trials x {} days (seed {})",
        stats.trial_count(),
        stats.horizon(),
        run.seed
    )?;
    for (label, pct) in stats.iter_overall() {
        writeln!(
            out,
            "  {} |{}| {:>7}",
            fit(label, label_width),
            bar(pct, width, '#'),
            format_percent(pct)
        )?;
    }
    Ok(())
}

/// One row per day with a marker under the occupied state's column
fn write_exemplar(out: &mut String, run: &SimulationRun) -> color_eyre::Result<()> {
    let Some(trajectory) = run.exemplar() else {
        return Ok(());
    };
    let labels = run.states.labels();
    let columns: Vec<usize> = labels.iter().map(|l| l.chars().count().max(1)).collect();

    writeln!(out, "Exemplar trajectory (trial 0)")?;
    write!(out, "  {:>4} ", "Day")?;
    for label in labels {
        write!(out, " {label}")?;
    }
    out.push('\n');

    for (day, state) in trajectory.states().iter().enumerate() {
        if !run.states.contains(*state) {
            return Err(ConsistencyError::UnknownState(*state).into());
        }
        write!(out, "  {:>4} ", day)?;
        for (i, column) in columns.iter().enumerate() {
            let cell = if i == state.index() { "o" } else { "" };
            write!(out, " {}", fit(cell, *column))?;
        }
        out.truncate(out.trim_end_matches(' ').len());
        out.push('\n');
    }
    Ok(())
}

fn write_per_day(out: &mut String, run: &SimulationRun, width: usize) -> color_eyre::Result<()> {
    let stats = &run.stats;
    let stacked = stats.stacked_per_day();

    writeln!(out, "State distribution by day")?;
    let legend: Vec<String> = stats
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{} {label}", fill_for(i)))
        .collect();
    writeln!(out, "  legend: {}", legend.join("  "))?;

    for day in 0..stats.horizon() {
        let mut row = String::with_capacity(width);
        for (state, (bottom, series)) in stacked.iter().zip(stats.per_day()).enumerate() {
            let start = cells_for(bottom[day], width);
            let end = cells_for(bottom[day] + series[day], width);
            row.extend(std::iter::repeat_n(fill_for(state), end.saturating_sub(start)));
        }
        // Rounding can leave the row a cell short or long
        let row = fit(&row, width);

        let shares: Vec<String> = stats
            .per_day()
            .iter()
            .map(|series| format!("{:>7}", format_percent(series[day])))
            .collect();
        writeln!(out, "  {:>4} |{}| {}", day, row, shares.join(" "))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct StateShare<'a> {
    state: &'a str,
    percent: f64,
}

#[derive(Serialize)]
struct StateSeries<'a> {
    state: &'a str,
    percent: &'a [f64],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    seed: u64,
    config: &'a SimulationConfig,
    overall: Vec<StateShare<'a>>,
    exemplar: Vec<&'a str>,
    per_day: Vec<StateSeries<'a>>,
}

/// Render the run as pretty-printed JSON
pub fn render_json(run: &SimulationRun, config: &SimulationConfig) -> color_eyre::Result<String> {
    let exemplar = match run.exemplar() {
        Some(trajectory) => trajectory.labels(&run.states)?,
        None => Vec::new(),
    };

    let report = JsonReport {
        seed: run.seed,
        config,
        overall: run
            .stats
            .iter_overall()
            .map(|(state, percent)| StateShare { state, percent })
            .collect(),
        exemplar,
        per_day: run
            .stats
            .labels()
            .iter()
            .zip(run.stats.per_day())
            .map(|(state, series)| StateSeries {
                state,
                percent: series,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainsim_core::model::{StateId, Trajectory};
    use chainsim_core::simulation::run;

    fn small_run() -> (SimulationConfig, SimulationRun) {
        let config = SimulationConfig::default()
            .with_trials(200)
            .with_horizon(5)
            .with_seed(11);
        let result = run(&config).unwrap();
        (config, result)
    }

    #[test]
    fn test_text_report_sections() {
        let (_, result) = small_run();
        let text = render_text(&result, 20).unwrap();

        assert!(text.contains("State occupancy over 200 trials x 5 days (seed 11)"));
        assert!(text.contains("Exemplar trajectory (trial 0)"));
        assert!(text.contains("State distribution by day"));
        assert!(text.contains("legend: # Sunny  = Cloudy  + Rainy"));
        for label in ["Sunny", "Cloudy", "Rainy"] {
            assert!(text.contains(label));
        }
    }

    #[test]
    fn test_text_report_rows() {
        let (_, result) = small_run();
        let text = render_text(&result, 20).unwrap();

        // One marker per exemplar day
        let exemplar = text
            .split("Exemplar trajectory (trial 0)\n")
            .nth(1)
            .unwrap()
            .split("\n\n")
            .next()
            .unwrap();
        let day_rows: Vec<&str> = exemplar.lines().skip(1).collect();
        assert_eq!(day_rows.len(), 5);
        assert!(day_rows.iter().all(|row| row.matches('o').count() == 1));

        // Every stacked bar is exactly the requested width
        let per_day = text.split("State distribution by day\n").nth(1).unwrap();
        let bars: Vec<&str> = per_day
            .lines()
            .skip(1)
            .map(|line| line.split('|').nth(1).unwrap())
            .collect();
        assert_eq!(bars.len(), 5);
        assert!(bars.iter().all(|b| b.chars().count() == 20));
    }

    #[test]
    fn test_json_report() {
        let (config, result) = small_run();
        let json = render_json(&result, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["seed"], 11);
        assert_eq!(value["config"]["trial_count"], 200);
        assert_eq!(value["exemplar"].as_array().unwrap().len(), 5);

        let overall = value["overall"].as_array().unwrap();
        assert_eq!(overall.len(), 3);
        assert_eq!(overall[0]["state"], "Sunny");
        let total: f64 = overall
            .iter()
            .map(|s| s["percent"].as_f64().unwrap())
            .sum();
        assert!((total - 100.0).abs() < 1e-6);

        let per_day = value["per_day"].as_array().unwrap();
        assert_eq!(per_day[2]["state"], "Rainy");
        assert_eq!(per_day[2]["percent"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_text_report_rejects_foreign_exemplar_state() {
        let (_, mut result) = small_run();
        result.trials.trajectories[0] = Trajectory::new(vec![StateId(7); 5]);

        let err = render_text(&result, 20).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConsistencyError>(),
            Some(&ConsistencyError::UnknownState(StateId(7)))
        );
    }
}

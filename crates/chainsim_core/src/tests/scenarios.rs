//! End-to-end runs through `simulation::run`

use crate::config::SimulationConfig;
use crate::simulation::run;

/// The three-state weather example at full size
#[test]
fn test_weather_scenario() {
    let config = SimulationConfig::default().with_seed(12345);
    let result = run(&config).unwrap();

    assert_eq!(result.seed, 12345);
    assert_eq!(result.trials.len(), 100_000);
    assert_eq!(result.stats.labels(), ["Sunny", "Cloudy", "Rainy"]);

    let total: f64 = result.stats.overall().iter().sum();
    assert!((total - 100.0).abs() < 1e-6);

    let sunny = result.stats.per_day_for("Sunny").unwrap();
    assert_eq!(sunny.len(), 30);
    assert!(sunny.iter().all(|p| (0.0..=100.0).contains(p)));

    // Day 0 reflects the 50/30/20 initial distribution
    assert!((sunny[0] - 50.0).abs() < 1.0);
    assert!((result.stats.per_day_for("Cloudy").unwrap()[0] - 30.0).abs() < 1.0);
    assert!((result.stats.per_day_for("Rainy").unwrap()[0] - 20.0).abs() < 1.0);

    let exemplar = result.exemplar().unwrap();
    assert_eq!(exemplar.len(), 30);
    assert_eq!(exemplar.labels(&result.states).unwrap().len(), 30);
}

/// With random matrices the chain forgets its start: late days drift toward uniform
#[test]
fn test_late_days_approach_uniform() {
    let config = SimulationConfig::default()
        .with_initial_distribution(vec![1.0, 0.0, 0.0])
        .with_trials(20_000)
        .with_seed(99);
    let result = run(&config).unwrap();

    for label in ["Sunny", "Cloudy", "Rainy"] {
        let last = *result.stats.per_day_for(label).unwrap().last().unwrap();
        assert!(
            (last - 100.0 / 3.0).abs() < 2.0,
            "{label} on final day: {last}%"
        );
    }
}

/// A one-day horizon only records the initial states
#[test]
fn test_degenerate_horizon() {
    let config = SimulationConfig::default()
        .with_trials(5_000)
        .with_horizon(1)
        .with_seed(3);
    let result = run(&config).unwrap();

    assert!(result.trials.iter().all(|t| t.len() == 1));
    assert_eq!(result.stats.horizon(), 1);
    for (i, series) in result.stats.per_day().iter().enumerate() {
        assert_eq!(series.len(), 1);
        assert!((series[0] - result.stats.overall()[i]).abs() < 1e-9);
    }
}

/// Same configured seed reproduces the whole run
#[test]
fn test_run_is_reproducible_with_seed() {
    let config = SimulationConfig::default()
        .with_trials(2_000)
        .with_horizon(15)
        .with_seed(4242);

    let first = run(&config).unwrap();
    let second = run(&config).unwrap();

    assert_eq!(first.trials, second.trials);
    assert_eq!(first.stats, second.stats);
}

/// Without a seed the chosen master seed is reported and replays the run
#[test]
fn test_random_seed_is_reported() {
    let config = SimulationConfig::default().with_trials(300).with_horizon(5);
    let first = run(&config).unwrap();

    let replay = run(&config.clone().with_seed(first.seed)).unwrap();
    assert_eq!(first.trials, replay.trials);
}

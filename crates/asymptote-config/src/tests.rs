//! Tests for benchmark configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        name = "Worst Case"
        sizes = [10, 12, 15]
        warmup_count = 1
        random_seed = 7

        [trials]
        baseline = 5
        reductions = [{ from_size = 12, trials = 1 }]

        [limits]
        trial_timeout_secs = 0.5
        series_timeout_secs = 2
    "#;

    let config = BenchmarkConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.name, "Worst Case");
    assert_eq!(config.sizes, vec![10, 12, 15]);
    assert_eq!(config.warmup_count, 1);
    assert_eq!(config.random_seed, Some(7));
    assert_eq!(config.trials.baseline, 5);
    assert_eq!(config.trial_timeout(), Some(Duration::from_millis(500)));
    assert_eq!(config.series_timeout(), Some(Duration::from_secs(2)));
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        name: Dijkstra
        sizes: [10, 50, 100]
        trials:
          baseline: 3
        limits:
          series_timeout_secs: 900
    "#;

    let config = BenchmarkConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.sizes, vec![10, 50, 100]);
    assert_eq!(config.trials, TrialPolicy::fixed(3));
    assert_eq!(config.trial_timeout(), None);
    assert_eq!(config.series_timeout(), Some(Duration::from_secs(900)));
}

#[test]
fn test_builder() {
    let config = BenchmarkConfig::new("Built")
        .with_sizes([1, 2, 3])
        .with_baseline_trials(4)
        .with_reduction(3, 2)
        .with_warmup_count(2)
        .with_random_seed(123);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.warmup_count, 2);
    assert_eq!(config.trials.trials_for(ProblemSize::new(2).unwrap()), 4);
    assert_eq!(config.trials.trials_for(ProblemSize::new(3).unwrap()), 2);
}

#[test]
fn test_empty_sizes_is_usage_error() {
    let err = BenchmarkConfig::new("Empty").validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("empty"));

    let usage: AsymptoteError = err.into();
    assert!(matches!(usage, AsymptoteError::Usage(_)));
}

#[test]
fn test_zero_size_rejected() {
    let config = BenchmarkConfig::new("Zero").with_sizes([0, 5]);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_non_increasing_sizes_rejected() {
    let config = BenchmarkConfig::new("Order").with_sizes([10, 10, 20]);
    assert!(config.validate().is_err());

    let config = BenchmarkConfig::new("Order").with_sizes([20, 10]);
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_trial_count_rejected() {
    let config = BenchmarkConfig::new("Trials")
        .with_sizes([5])
        .with_baseline_trials(0);
    assert!(config.validate().is_err());

    let config = BenchmarkConfig::new("Trials")
        .with_sizes([5])
        .with_reduction(5, 0);
    assert!(config.validate().is_err());
}

#[test]
fn test_non_positive_timeout_rejected() {
    let mut config = BenchmarkConfig::new("Limits").with_sizes([5]);
    config.limits.trial_timeout_secs = Some(0.0);
    assert!(config.validate().is_err());

    config.limits.trial_timeout_secs = None;
    config.limits.series_timeout_secs = Some(f64::NAN);
    assert!(config.validate().is_err());
}

#[test]
fn test_reductions_pick_largest_applicable_threshold() {
    // Listed out of order on purpose.
    let policy = TrialPolicy {
        baseline: 10,
        reductions: vec![
            TrialReduction {
                from_size: 30,
                trials: 1,
            },
            TrialReduction {
                from_size: 20,
                trials: 5,
            },
        ],
    };
    let size = |n| ProblemSize::new(n).unwrap();

    assert_eq!(policy.trials_for(size(19)), 10);
    assert_eq!(policy.trials_for(size(25)), 5);
    assert_eq!(policy.trials_for(size(31)), 1);
}

#[test]
fn test_presets_are_valid() {
    let suite = SuiteConfig::default();
    assert!(suite.validate().is_ok());
    assert_eq!(suite.backtracking.sizes.last(), Some(&30));
    assert_eq!(suite.worst_case.trials.baseline, 5);
    assert_eq!(suite.shortest_path.trials.baseline, 3);
}

#[test]
fn test_suite_partial_override() {
    let toml = r#"
        output_dir = "out"

        [shortest_path]
        name = "Small Dijkstra"
        sizes = [10, 20]
    "#;

    let suite = SuiteConfig::from_toml_str(toml).unwrap();
    assert_eq!(suite.output_dir, "out");
    assert_eq!(suite.random_seed, Some(42));
    assert_eq!(suite.shortest_path.sizes, vec![10, 20]);
    assert_eq!(suite.backtracking, BenchmarkConfig::backtracking());
}

#[test]
fn test_suite_seed_fills_missing_series_seed() {
    let suite = SuiteConfig::default();
    let seeded = suite.seeded(&BenchmarkConfig::new("Unseeded").with_sizes([1]));
    assert_eq!(seeded.random_seed, Some(42));

    let own = suite.seeded(&BenchmarkConfig::new("Own").with_random_seed(9));
    assert_eq!(own.random_seed, Some(9));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SuiteConfig::load("definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

//! Tests for the adaptive runner.

use super::*;
use asymptote_algorithms::{Backtracking, NearEqualSubsetSum};
use asymptote_test::{Behavior, BehaviorSubject, CountingGenerator, InstantSubject, ScriptedGenerator};

fn size(n: usize) -> ProblemSize {
    ProblemSize::new(n).unwrap()
}

fn scripted(config: BenchmarkConfig, generator: ScriptedGenerator) -> BenchmarkSeries {
    Benchmark::new(config, BehaviorSubject, generator)
        .run()
        .unwrap()
}

#[test]
fn test_single_size_single_trial() {
    let subject = InstantSubject::default();
    let mut generator = CountingGenerator::new(InstanceReuse::PerSize);
    let config = BenchmarkConfig::new("Boundary")
        .with_sizes([5])
        .with_baseline_trials(1);

    let series = Benchmark::new(config, &subject, &mut generator)
        .run()
        .unwrap();

    assert_eq!(series.samples.len(), 1);
    assert_eq!(series.samples[0].trials_completed, 1);
    assert_eq!(series.samples[0].status, SampleStatus::Complete);
    assert_eq!(series.termination, SeriesTermination::Completed);
    assert_eq!(subject.calls(), 1);
}

#[test]
fn test_empty_sizes_fail_before_any_trial() {
    let subject = InstantSubject::default();
    let mut generator = CountingGenerator::new(InstanceReuse::PerSize);

    let err = Benchmark::new(BenchmarkConfig::new("Empty"), &subject, &mut generator)
        .run()
        .unwrap_err();

    assert!(matches!(err, AsymptoteError::Usage(_)));
    assert_eq!(subject.calls(), 0);
    assert_eq!(generator.generated(), 0);
}

#[test]
fn test_trial_counts_follow_policy() {
    let subject = InstantSubject::default();
    let config = BenchmarkConfig::new("Policy")
        .with_sizes([1, 2, 3, 4])
        .with_baseline_trials(3)
        .with_reduction(3, 2)
        .with_reduction(4, 1);

    let series = Benchmark::new(config, &subject, CountingGenerator::new(InstanceReuse::PerSize))
        .run()
        .unwrap();

    let counts: Vec<_> = series.samples.iter().map(|s| s.trials_completed).collect();
    assert_eq!(counts, vec![3, 3, 2, 1]);
    assert_eq!(subject.calls(), 9);
}

#[test]
fn test_per_size_reuse_generates_once_per_size() {
    let mut generator = CountingGenerator::new(InstanceReuse::PerSize);
    let config = BenchmarkConfig::new("Reuse")
        .with_sizes([1, 2])
        .with_baseline_trials(3);

    Benchmark::new(config, InstantSubject::default(), &mut generator)
        .run()
        .unwrap();

    assert_eq!(generator.generated(), 2);
}

#[test]
fn test_per_trial_reuse_generates_every_trial() {
    let mut generator = CountingGenerator::new(InstanceReuse::PerTrial);
    let config = BenchmarkConfig::new("Regenerate")
        .with_sizes([1, 2])
        .with_baseline_trials(3);

    Benchmark::new(config, InstantSubject::default(), &mut generator)
        .run()
        .unwrap();

    assert_eq!(generator.generated(), 6);
}

#[test]
fn test_seeded_runs_are_repeatable() {
    let config = BenchmarkConfig::new("Repeatable")
        .with_sizes([4, 8, 12])
        .with_baseline_trials(3)
        .with_reduction(12, 1);

    let run = || {
        Benchmark::new(
            config.clone(),
            Backtracking,
            NearEqualSubsetSum::with_seed(42),
        )
        .run()
        .unwrap()
    };
    let (a, b) = (run(), run());

    let shape = |s: &BenchmarkSeries| {
        s.samples
            .iter()
            .map(|x| (x.size, x.trials_completed, x.trials_planned))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&a), shape(&b));
    assert_eq!(shape(&a).len(), 3);
}

#[test]
fn test_over_ceiling_trial_is_not_averaged() {
    let ceiling = Duration::from_millis(40);
    let generator = ScriptedGenerator::new(Behavior::Instant).with_script(
        1,
        [Behavior::Instant, Behavior::sleep_ms(120), Behavior::Instant],
    );
    let config = BenchmarkConfig::new("Cutoff")
        .with_sizes([1, 2])
        .with_baseline_trials(3)
        .with_trial_timeout(ceiling);

    let series = scripted(config, generator);

    let first = &series.samples[0];
    assert_eq!(first.trials_completed, 1);
    assert_eq!(first.trials_planned, 3);
    assert_eq!(first.status, SampleStatus::TrialCutoff);
    assert!(first.average_duration < ceiling);

    // A later-trial cutoff does not end the series.
    assert_eq!(series.samples.len(), 2);
    assert_eq!(series.termination, SeriesTermination::Completed);
    assert!(series.samples.iter().all(|s| s.average_duration <= ceiling));
}

#[test]
fn test_first_trial_over_ceiling_drops_size_and_continues() {
    let generator =
        ScriptedGenerator::new(Behavior::Instant).with_script(2, [Behavior::sleep_ms(60)]);
    let config = BenchmarkConfig::new("Timeout")
        .with_sizes([1, 2, 3, 4])
        .with_baseline_trials(1)
        .with_trial_timeout(Duration::from_millis(40))
        .with_series_timeout(Duration::from_secs(1));

    let series = scripted(config, generator);

    let sampled: Vec<_> = series.sizes().map(|s| s.get()).collect();
    assert_eq!(sampled, vec![1, 3, 4]);
    assert_eq!(
        series.dropped,
        vec![DroppedSize {
            size: size(2),
            reason: DropReason::TrialTimeout
        }]
    );
    assert_eq!(series.termination, SeriesTermination::Completed);
}

#[test]
fn test_timed_out_first_trial_over_series_ceiling_stops() {
    let generator =
        ScriptedGenerator::new(Behavior::Instant).with_script(2, [Behavior::sleep_ms(60)]);
    let config = BenchmarkConfig::new("Timeout")
        .with_sizes([1, 2, 3])
        .with_baseline_trials(1)
        .with_trial_timeout(Duration::from_millis(20))
        .with_series_timeout(Duration::from_millis(40));

    let series = scripted(config, generator);

    let sampled: Vec<_> = series.sizes().map(|s| s.get()).collect();
    assert_eq!(sampled, vec![1]);
    assert_eq!(series.dropped[0].reason, DropReason::TrialTimeout);
    assert_eq!(
        series.termination,
        SeriesTermination::SeriesCeiling { size: size(2) }
    );
}

#[test]
fn test_exhaustion_on_first_trial_skips_size() {
    let generator =
        ScriptedGenerator::new(Behavior::Instant).with_script(2, [Behavior::Exhaust]);
    let config = BenchmarkConfig::new("Exhausted")
        .with_sizes([1, 2, 3])
        .with_baseline_trials(2);

    let series = scripted(config, generator);

    let sampled: Vec<_> = series.sizes().map(|s| s.get()).collect();
    assert_eq!(sampled, vec![1, 3]);
    assert_eq!(series.dropped[0].reason, DropReason::ResourceExhausted);
    assert_eq!(series.termination, SeriesTermination::Completed);
}

#[test]
fn test_exhaustion_on_later_trial_keeps_partial_average() {
    let generator = ScriptedGenerator::new(Behavior::Instant)
        .with_script(1, [Behavior::Instant, Behavior::Exhaust]);
    let config = BenchmarkConfig::new("Partial")
        .with_sizes([1])
        .with_baseline_trials(4);

    let series = scripted(config, generator);

    assert_eq!(series.samples[0].trials_completed, 1);
    assert_eq!(series.samples[0].status, SampleStatus::ResourceExhausted);
    assert!(series.dropped.is_empty());
}

#[test]
fn test_series_ceiling_stops_larger_sizes() {
    let generator =
        ScriptedGenerator::new(Behavior::Instant).with_script(2, [Behavior::sleep_ms(30)]);
    let config = BenchmarkConfig::new("Ceiling")
        .with_sizes([1, 2, 3, 4])
        .with_baseline_trials(1)
        .with_series_timeout(Duration::from_millis(10));

    let series = scripted(config, generator);

    let sampled: Vec<_> = series.sizes().map(|s| s.get()).collect();
    assert_eq!(sampled, vec![1, 2]);
    assert!(series.dropped.is_empty());
    assert_eq!(
        series.termination,
        SeriesTermination::SeriesCeiling { size: size(2) }
    );
}

#[test]
fn test_subject_that_never_completes_yields_empty_series() {
    let config = BenchmarkConfig::new("Hopeless")
        .with_sizes([1, 2])
        .with_baseline_trials(2);

    let series = scripted(config, ScriptedGenerator::new(Behavior::Exhaust));

    assert!(series.is_empty());
    assert_eq!(series.dropped.len(), 2);
    assert!(!series.growth().is_determined());
}

#[test]
fn test_warmup_calls_are_not_measured() {
    let subject = InstantSubject::default();
    let config = BenchmarkConfig::new("Warm")
        .with_sizes([3])
        .with_baseline_trials(1)
        .with_warmup_count(2);

    let series = Benchmark::new(config, &subject, CountingGenerator::new(InstanceReuse::PerSize))
        .run()
        .unwrap();

    assert_eq!(subject.calls(), 3);
    assert_eq!(series.total_trials(), 1);
}

#[test]
fn test_series_metadata_comes_from_subject() {
    let series = Benchmark::new(
        BenchmarkConfig::new("Meta").with_sizes([2]),
        Backtracking,
        NearEqualSubsetSum::with_seed(1),
    )
    .run()
    .unwrap();

    assert_eq!(series.name, "Meta");
    assert_eq!(series.subject, "Backtracking");
    assert_eq!(series.expected, asymptote_core::ComplexityClass::Exponential);
}

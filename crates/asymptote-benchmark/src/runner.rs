//! Adaptive benchmark runner.

use std::time::{Duration, Instant};

use asymptote_config::BenchmarkConfig;
use asymptote_core::{
    AsymptoteError, InstanceGenerator, InstanceReuse, ProblemSize, Subject, Workload,
};
use tracing::{debug, info, warn};

use crate::result::{
    BenchmarkSeries, DropReason, DroppedSize, SampleStatus, SeriesTermination, SizeSample,
    TrialOutcome, TrialTally,
};
use crate::trial::run_trial;

/// Measures one subject across a sequence of increasing sizes.
///
/// Trial counts shrink at expensive sizes according to the configured
/// [`TrialPolicy`](asymptote_config::TrialPolicy). Two ceilings bound the
/// total runtime:
///
/// * the **trial ceiling**: a trial slower than this stops further trials at
///   its size; it is excluded from the average. If it was the first trial,
///   the size is dropped and the runner moves on.
/// * the **series ceiling**: once a size's average exceeds it, no larger
///   size is attempted. A size dropped on a timeout is held to the same
///   ceiling using its first trial's duration.
///
/// A subject that runs out of resources on its first trial at a size has
/// that size dropped; the runner then moves on to the next size.
///
/// Everything runs sequentially on the calling thread. Ceilings are only
/// checked after a trial returns, so a subject that never returns hangs the
/// runner.
///
/// # Type Parameters
///
/// * `S` - The subject under measurement
/// * `G` - The instance generator feeding it
///
/// # Example
///
/// ```
/// use asymptote_benchmark::{Benchmark, BenchmarkConfig};
/// use asymptote_core::{ComplexityClass, FnSubject, InstanceGenerator, ProblemSize, Workload};
///
/// struct Ones;
///
/// impl InstanceGenerator for Ones {
///     type Instance = Vec<u64>;
///     type Target = ();
///
///     fn generate(&mut self, size: ProblemSize) -> Workload<Vec<u64>, ()> {
///         Workload::new(vec![1; size.get()], ())
///     }
/// }
///
/// let sum = FnSubject::new("sum", ComplexityClass::Polynomial(1), |v: &Vec<u64>, _: &()| {
///     Ok(v.iter().sum::<u64>())
/// });
///
/// let config = BenchmarkConfig::new("Linear").with_sizes([10, 100, 1000]).with_baseline_trials(2);
/// let series = Benchmark::new(config, sum, Ones).run().unwrap();
///
/// assert_eq!(series.samples.len(), 3);
/// assert_eq!(series.total_trials(), 6);
/// ```
pub struct Benchmark<S, G> {
    config: BenchmarkConfig,
    subject: S,
    generator: G,
}

enum SizeOutcome {
    Sampled(SizeSample),
    // The duration is the over-ceiling first trial, when there was one.
    Dropped(DroppedSize, Option<Duration>),
}

impl<S, G> Benchmark<S, G>
where
    S: Subject,
    G: InstanceGenerator<Instance = S::Instance, Target = S::Target>,
{
    /// Creates a new benchmark.
    pub fn new(config: BenchmarkConfig, subject: S, generator: G) -> Self {
        Self {
            config,
            subject,
            generator,
        }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn subject(&self) -> &S {
        &self.subject
    }

    /// Runs the series.
    ///
    /// # Errors
    ///
    /// Returns [`AsymptoteError::Usage`] if the configuration is invalid,
    /// before any trial runs. Cutoffs and resource exhaustion are not errors;
    /// they show up in the returned series.
    pub fn run(&mut self) -> Result<BenchmarkSeries, AsymptoteError> {
        let sizes = self.config.requested_sizes()?;
        let trial_ceiling = self.config.trial_timeout();
        let series_ceiling = self.config.series_timeout();
        let started = Instant::now();

        let mut series = BenchmarkSeries::new(
            self.config.name.as_str(),
            self.subject.name(),
            self.subject.expected_complexity(),
        );

        info!(
            event = "series_start",
            series = %series.name,
            subject = %series.subject,
            expected = %series.expected,
            sizes = sizes.len(),
        );

        self.warm_up(sizes[0]);

        for size in sizes {
            let planned = self.config.trials.trials_for(size);
            debug!(event = "size_start", size = size.get(), trials = planned);

            match self.measure_size(size, planned, trial_ceiling) {
                SizeOutcome::Sampled(sample) => {
                    info!(
                        event = "size_end",
                        size = size.get(),
                        average_us = sample.average_duration.as_micros() as u64,
                        trials = sample.trials_completed,
                        planned = sample.trials_planned,
                        status = sample.status.as_str(),
                    );
                    let over_ceiling =
                        series_ceiling.is_some_and(|ceiling| sample.average_duration > ceiling);
                    series.samples.push(sample);
                    if over_ceiling {
                        series.termination = SeriesTermination::SeriesCeiling { size };
                        break;
                    }
                }
                SizeOutcome::Dropped(dropped, lower_bound) => {
                    warn!(
                        event = "size_dropped",
                        size = size.get(),
                        reason = %dropped.reason,
                    );
                    series.dropped.push(dropped);
                    let over_ceiling = series_ceiling
                        .zip(lower_bound)
                        .is_some_and(|(ceiling, duration)| duration > ceiling);
                    if over_ceiling {
                        series.termination = SeriesTermination::SeriesCeiling { size };
                        break;
                    }
                }
            }
        }

        series.elapsed = started.elapsed();
        info!(
            event = "series_end",
            series = %series.name,
            samples = series.samples.len(),
            dropped = series.dropped.len(),
            duration_ms = series.elapsed.as_millis() as u64,
            termination = %series.termination,
        );
        Ok(series)
    }

    // Unmeasured calls on the smallest size; results are discarded.
    fn warm_up(&mut self, size: ProblemSize) {
        for _ in 0..self.config.warmup_count {
            let workload = self.generator.generate(size);
            let _ = self.subject.solve(&workload.instance, &workload.target);
        }
    }

    fn measure_size(
        &mut self,
        size: ProblemSize,
        planned: usize,
        trial_ceiling: Option<Duration>,
    ) -> SizeOutcome {
        let reuse = self.generator.reuse();
        let mut shared: Option<Workload<S::Instance, S::Target>> = None;
        let mut tally = TrialTally::default();
        let mut status = SampleStatus::Complete;

        for _ in 0..planned {
            let result = match reuse {
                InstanceReuse::PerSize => {
                    let workload = shared.get_or_insert_with(|| self.generator.generate(size));
                    run_trial(&self.subject, size, &workload.instance, &workload.target)
                }
                InstanceReuse::PerTrial => {
                    let workload = self.generator.generate(size);
                    run_trial(&self.subject, size, &workload.instance, &workload.target)
                }
            };

            let failure = match result.outcome {
                TrialOutcome::ResourceExhausted(_) => Some(DropReason::ResourceExhausted),
                TrialOutcome::Completed(_)
                    if trial_ceiling.is_some_and(|ceiling| result.duration > ceiling) =>
                {
                    Some(DropReason::TrialTimeout)
                }
                TrialOutcome::Completed(_) => None,
            };

            match failure {
                None => tally.record(result.duration),
                Some(reason) if tally.is_empty() => {
                    let lower_bound =
                        (reason == DropReason::TrialTimeout).then_some(result.duration);
                    return SizeOutcome::Dropped(DroppedSize { size, reason }, lower_bound);
                }
                Some(reason) => {
                    status = match reason {
                        DropReason::ResourceExhausted => SampleStatus::ResourceExhausted,
                        DropReason::TrialTimeout => SampleStatus::TrialCutoff,
                    };
                    break;
                }
            }
        }

        // `planned` is at least 1 after validation, so an empty tally means
        // the loop never ran.
        match SizeSample::from_tally(size, &tally, planned, status) {
            Some(sample) => SizeOutcome::Sampled(sample),
            None => SizeOutcome::Dropped(
                DroppedSize {
                    size,
                    reason: DropReason::ResourceExhausted,
                },
                None,
            ),
        }
    }
}

#[cfg(test)]
mod tests;

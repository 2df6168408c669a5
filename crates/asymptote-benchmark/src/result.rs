//! Benchmark result types.

use std::fmt;
use std::time::Duration;

use asymptote_core::{ComplexityClass, ProblemSize, ResourceExhausted};

use crate::estimator::{ExponentialEstimate, GrowthEstimate};

/// What a single subject call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome<O> {
    /// The subject returned normally.
    Completed(O),
    /// The subject ran out of a resource before finishing.
    ResourceExhausted(ResourceExhausted),
}

impl<O> TrialOutcome<O> {
    /// Returns true if the subject returned normally.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Result of one timed call to a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialResult<O> {
    /// Size of the instance the trial ran on.
    pub size: ProblemSize,
    /// Wall-clock time, up to the failure point for exhausted trials.
    pub duration: Duration,
    /// The subject's result.
    pub outcome: TrialOutcome<O>,
}

/// Running total of the trials completed at one size.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::TrialTally;
/// use std::time::Duration;
///
/// let mut tally = TrialTally::default();
/// assert_eq!(tally.average(), None);
///
/// tally.record(Duration::from_millis(100));
/// tally.record(Duration::from_millis(200));
/// assert_eq!(tally.completed(), 2);
/// assert_eq!(tally.average(), Some(Duration::from_millis(150)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialTally {
    completed: usize,
    total: Duration,
}

impl TrialTally {
    /// Adds one completed trial.
    pub fn record(&mut self, duration: Duration) {
        self.completed += 1;
        self.total = self.total.saturating_add(duration);
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.completed == 0
    }

    /// Mean duration over the completed trials, or `None` if there are none.
    pub fn average(&self) -> Option<Duration> {
        if self.completed == 0 {
            return None;
        }
        Some(match u32::try_from(self.completed) {
            Ok(n) => self.total / n,
            Err(_) => self.total.div_f64(self.completed as f64),
        })
    }
}

/// How the trials at one size ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleStatus {
    /// Every planned trial ran.
    Complete,
    /// A trial exceeded the per-trial ceiling; it is not part of the average.
    TrialCutoff,
    /// A later trial ran out of resources; earlier trials are averaged.
    ResourceExhausted,
}

impl SampleStatus {
    /// Short machine-friendly label used in CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::TrialCutoff => "trial_cutoff",
            Self::ResourceExhausted => "resource_exhausted",
        }
    }
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated timing for one requested size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSample {
    pub size: ProblemSize,
    /// Mean over completed trials only.
    pub average_duration: Duration,
    /// Always at least 1.
    pub trials_completed: usize,
    pub trials_planned: usize,
    pub status: SampleStatus,
}

impl SizeSample {
    /// Builds a sample from a tally, or `None` if no trial completed.
    pub fn from_tally(
        size: ProblemSize,
        tally: &TrialTally,
        trials_planned: usize,
        status: SampleStatus,
    ) -> Option<Self> {
        Some(Self {
            size,
            average_duration: tally.average()?,
            trials_completed: tally.completed(),
            trials_planned,
            status,
        })
    }

    /// Average duration in seconds.
    pub fn average_secs(&self) -> f64 {
        self.average_duration.as_secs_f64()
    }
}

/// Why a requested size produced no sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The first trial ran out of resources.
    ResourceExhausted,
    /// The first trial exceeded the per-trial ceiling.
    TrialTimeout,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceExhausted => f.write_str("resource exhausted"),
            Self::TrialTimeout => f.write_str("trial timeout"),
        }
    }
}

/// A requested size that never completed a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedSize {
    pub size: ProblemSize,
    pub reason: DropReason,
}

/// Why the runner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesTermination {
    /// Every requested size was attempted.
    Completed,
    /// The time spent at `size` exceeded the series ceiling. For a sampled
    /// size that is its average; for a size dropped on a timeout it is the
    /// first trial, a lower bound on the average.
    SeriesCeiling { size: ProblemSize },
}

impl SeriesTermination {
    /// Returns true if the series stopped before its last requested size.
    pub fn is_early(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl fmt::Display for SeriesTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("all sizes attempted"),
            Self::SeriesCeiling { size } => {
                write!(f, "stopped after n={size}: exceeded series ceiling")
            }
        }
    }
}

/// Output of one benchmark run: a subject measured over a size sequence.
///
/// `samples` is in requested order and may be shorter than the requested
/// sizes; every size that produced no sample appears in `dropped`.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSeries {
    /// Series name from the configuration.
    pub name: String,
    /// Subject name.
    pub subject: String,
    /// The subject's theoretical complexity.
    pub expected: ComplexityClass,
    pub samples: Vec<SizeSample>,
    pub dropped: Vec<DroppedSize>,
    pub termination: SeriesTermination,
    /// Wall-clock time of the whole run, warmup included.
    pub elapsed: Duration,
}

impl BenchmarkSeries {
    /// Creates an empty series.
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        expected: ComplexityClass,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            expected,
            samples: Vec::new(),
            dropped: Vec::new(),
            termination: SeriesTermination::Completed,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sizes that produced a sample, in order.
    pub fn sizes(&self) -> impl Iterator<Item = ProblemSize> + '_ {
        self.samples.iter().map(|s| s.size)
    }

    /// Total measured trials across all samples.
    pub fn total_trials(&self) -> usize {
        self.samples.iter().map(|s| s.trials_completed).sum()
    }

    /// Power-law fit over the samples.
    pub fn growth(&self) -> GrowthEstimate {
        GrowthEstimate::fit(&self.samples)
    }

    /// Semi-log exponential fit over the samples.
    pub fn exponential(&self) -> ExponentialEstimate {
        ExponentialEstimate::fit(&self.samples)
    }
}

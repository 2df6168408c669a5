//! Adaptive benchmarking for Asymptote.
//!
//! This crate runs a subject over increasing problem sizes, keeps the total
//! runtime bounded as cost grows, and fits a growth rate to what it measured.
//!
//! # Overview
//!
//! - [`run_trial`] times exactly one subject call
//! - [`Benchmark`] orchestrates trials across sizes with shrinking trial
//!   counts, a per-trial ceiling and a series ceiling
//! - [`GrowthEstimate`] and [`ExponentialEstimate`] fit power-law and
//!   exponential curves to the samples
//! - [`CsvExporter`], [`MarkdownReport`] and [`AnalysisReport`] render results
//!
//! # Zero-Erasure Design
//!
//! The subject `S` and generator `G` are type parameters of [`Benchmark`],
//! not trait objects, so the measured call is monomorphized.
//!
//! # Example
//!
//! ```
//! use asymptote_algorithms::{Backtracking, HardSubsetSum};
//! use asymptote_benchmark::{Benchmark, BenchmarkConfig, MarkdownReport};
//! use std::time::Duration;
//!
//! let config = BenchmarkConfig::new("Worst Case")
//!     .with_sizes([4, 6, 8, 10])
//!     .with_baseline_trials(3)
//!     .with_reduction(10, 1)
//!     .with_trial_timeout(Duration::from_secs(5));
//!
//! let series = Benchmark::new(config, Backtracking, HardSubsetSum).run().unwrap();
//! assert_eq!(series.samples.len(), 4);
//!
//! let report = MarkdownReport::to_string(&series);
//! assert!(report.contains("O(2^n)"));
//! ```

pub mod estimator;
pub mod report;
pub mod result;
pub mod runner;
pub mod trial;

pub use asymptote_config::{BenchmarkConfig, TrialPolicy};
pub use estimator::{ExponentialEstimate, GrowthEstimate};
pub use report::{format_duration, AnalysisReport, CsvExporter, MarkdownReport};
pub use result::{
    BenchmarkSeries, DropReason, DroppedSize, SampleStatus, SeriesTermination, SizeSample,
    TrialOutcome, TrialResult, TrialTally,
};
pub use runner::Benchmark;
pub use trial::run_trial;

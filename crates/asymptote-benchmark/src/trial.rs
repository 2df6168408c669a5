//! Timed trial.

use std::hint::black_box;
use std::time::Instant;

use asymptote_core::{ProblemSize, Subject};
use tracing::trace;

use crate::result::{TrialOutcome, TrialResult};

/// Runs the subject exactly once and measures wall-clock time.
///
/// Uses the monotonic clock. A subject that reports resource exhaustion
/// yields [`TrialOutcome::ResourceExhausted`] with the time spent up to the
/// failure; it never aborts the caller.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::{run_trial, TrialOutcome};
/// use asymptote_core::{ComplexityClass, FnSubject, ProblemSize};
///
/// let sum = FnSubject::new("sum", ComplexityClass::Polynomial(1), |v: &Vec<u64>, _: &()| {
///     Ok(v.iter().sum::<u64>())
/// });
///
/// let size = ProblemSize::new(3).unwrap();
/// let result = run_trial(&sum, size, &vec![1, 2, 3], &());
/// assert_eq!(result.outcome, TrialOutcome::Completed(6));
/// ```
pub fn run_trial<S>(
    subject: &S,
    size: ProblemSize,
    instance: &S::Instance,
    target: &S::Target,
) -> TrialResult<S::Outcome>
where
    S: Subject + ?Sized,
{
    let start = Instant::now();
    let solved = subject.solve(black_box(instance), black_box(target));
    let duration = start.elapsed();

    let outcome = match solved {
        Ok(outcome) => TrialOutcome::Completed(black_box(outcome)),
        Err(exhausted) => TrialOutcome::ResourceExhausted(exhausted),
    };

    trace!(
        event = "trial",
        size = size.get(),
        duration_us = duration.as_micros() as u64,
        completed = outcome.is_completed(),
    );

    TrialResult {
        size,
        duration,
        outcome,
    }
}

//! The algorithm under measurement.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use crate::complexity::ComplexityClass;
use crate::error::ResourceExhausted;

/// A pluggable algorithm whose running time is being measured.
///
/// Implementations must be pure: deterministic given their inputs, with no
/// shared mutable state across calls. The runner may call `solve` on the same
/// instance many times and on freshly generated instances in between, and
/// assumes no cross-call interference.
///
/// Resource exhaustion is reported as `Err(ResourceExhausted)` rather than by
/// aborting the process, typically by allocating large tables through
/// `try_reserve` and converting the error.
///
/// # Example
///
/// ```
/// use asymptote_core::{ComplexityClass, ResourceExhausted, Subject};
///
/// struct LinearSum;
///
/// impl Subject for LinearSum {
///     type Instance = Vec<u64>;
///     type Target = u64;
///     type Outcome = bool;
///
///     fn name(&self) -> &str {
///         "Linear Sum"
///     }
///
///     fn expected_complexity(&self) -> ComplexityClass {
///         ComplexityClass::Polynomial(1)
///     }
///
///     fn solve(&self, nums: &Vec<u64>, target: &u64) -> Result<bool, ResourceExhausted> {
///         Ok(nums.iter().sum::<u64>() == *target)
///     }
/// }
///
/// assert_eq!(LinearSum.solve(&vec![1, 2, 3], &6), Ok(true));
/// ```
pub trait Subject {
    /// The problem instance the subject consumes.
    type Instance;
    /// Subject-specific parameter passed next to the instance (target sum, source vertex).
    type Target;
    /// The value returned by a successful call.
    type Outcome;

    /// Display name used in logs and reports.
    fn name(&self) -> &str;

    /// Theoretical complexity class, reported alongside the empirical fit.
    fn expected_complexity(&self) -> ComplexityClass;

    /// Solves a single instance.
    fn solve(
        &self,
        instance: &Self::Instance,
        target: &Self::Target,
    ) -> Result<Self::Outcome, ResourceExhausted>;
}

/// Adapts a plain function or closure into a [`Subject`].
///
/// # Example
///
/// ```
/// use asymptote_core::{ComplexityClass, FnSubject, Subject};
///
/// let subject = FnSubject::new("Contains", ComplexityClass::Polynomial(1), |v: &Vec<i32>, x: &i32| {
///     Ok(v.contains(x))
/// });
/// assert_eq!(subject.name(), "Contains");
/// assert_eq!(subject.solve(&vec![1, 2], &2), Ok(true));
/// ```
pub struct FnSubject<F, I, T, O> {
    name: String,
    complexity: ComplexityClass,
    solve_fn: F,
    _phantom: PhantomData<fn(&I, &T) -> O>,
}

impl<F, I, T, O> FnSubject<F, I, T, O>
where
    F: Fn(&I, &T) -> Result<O, ResourceExhausted>,
{
    /// Wraps `solve_fn` as a subject with the given name and expected complexity.
    pub fn new(name: impl Into<String>, complexity: ComplexityClass, solve_fn: F) -> Self {
        Self {
            name: name.into(),
            complexity,
            solve_fn,
            _phantom: PhantomData,
        }
    }
}

impl<F, I, T, O> Debug for FnSubject<F, I, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSubject")
            .field("name", &self.name)
            .field("complexity", &self.complexity)
            .finish()
    }
}

impl<F, I, T, O> Subject for FnSubject<F, I, T, O>
where
    F: Fn(&I, &T) -> Result<O, ResourceExhausted>,
{
    type Instance = I;
    type Target = T;
    type Outcome = O;

    fn name(&self) -> &str {
        &self.name
    }

    fn expected_complexity(&self) -> ComplexityClass {
        self.complexity
    }

    fn solve(&self, instance: &I, target: &T) -> Result<O, ResourceExhausted> {
        (self.solve_fn)(instance, target)
    }
}

impl<S: Subject + ?Sized> Subject for &S {
    type Instance = S::Instance;
    type Target = S::Target;
    type Outcome = S::Outcome;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn expected_complexity(&self) -> ComplexityClass {
        (**self).expected_complexity()
    }

    fn solve(
        &self,
        instance: &Self::Instance,
        target: &Self::Target,
    ) -> Result<Self::Outcome, ResourceExhausted> {
        (**self).solve(instance, target)
    }
}

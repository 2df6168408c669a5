//! Instance generation.

use crate::size::ProblemSize;

/// A generated problem: the instance plus the subject-specific target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload<I, T> {
    /// The problem instance, opaque to the benchmark core.
    pub instance: I,
    /// The parameter passed next to the instance (target sum, source vertex).
    pub target: T,
}

impl<I, T> Workload<I, T> {
    /// Creates a new workload.
    pub fn new(instance: I, target: T) -> Self {
        Self { instance, target }
    }
}

/// Whether a generator's instance is reused across the trials of one size.
///
/// Adversarial generators build one worst-case instance per size and measure
/// it repeatedly; stochastic generators draw a fresh instance for every
/// trial. Both are legal; the runner honours whichever the generator declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstanceReuse {
    /// Generate once per size and reuse it for every trial at that size.
    #[default]
    PerSize,

    /// Generate a fresh instance for every trial.
    PerTrial,
}

/// Produces problem instances of a requested size.
///
/// Generators may be stochastic, but must be constructible from a seed so
/// that two runs over the same size sequence see the same instances. The
/// `&mut self` receiver exists only to advance the generator's own RNG.
///
/// # Example
///
/// ```
/// use asymptote_core::{InstanceGenerator, InstanceReuse, ProblemSize, Workload};
///
/// struct Ones;
///
/// impl InstanceGenerator for Ones {
///     type Instance = Vec<u64>;
///     type Target = u64;
///
///     fn generate(&mut self, size: ProblemSize) -> Workload<Vec<u64>, u64> {
///         Workload::new(vec![1; size.get()], size.get() as u64)
///     }
/// }
///
/// let mut ones = Ones;
/// let w = ones.generate(ProblemSize::new(3).unwrap());
/// assert_eq!(w.instance, vec![1, 1, 1]);
/// assert_eq!(ones.reuse(), InstanceReuse::PerSize);
/// ```
pub trait InstanceGenerator {
    /// The generated instance type.
    type Instance;
    /// The generated target type.
    type Target;

    /// Generates a workload of the given size.
    fn generate(&mut self, size: ProblemSize) -> Workload<Self::Instance, Self::Target>;

    /// Declares the instance reuse policy. Defaults to one instance per size.
    fn reuse(&self) -> InstanceReuse {
        InstanceReuse::PerSize
    }
}

impl<G: InstanceGenerator + ?Sized> InstanceGenerator for &mut G {
    type Instance = G::Instance;
    type Target = G::Target;

    fn generate(&mut self, size: ProblemSize) -> Workload<Self::Instance, Self::Target> {
        (**self).generate(size)
    }

    fn reuse(&self) -> InstanceReuse {
        (**self).reuse()
    }
}

//! Call-counting fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};

use asymptote_core::{
    ComplexityClass, InstanceGenerator, InstanceReuse, ProblemSize, ResourceExhausted, Subject,
    Workload,
};

/// Deterministic subject that returns the instance length immediately and
/// counts its calls.
///
/// # Example
///
/// ```
/// use asymptote_core::Subject;
/// use asymptote_test::InstantSubject;
///
/// let subject = InstantSubject::default();
/// assert_eq!(subject.solve(&vec![0; 4], &0), Ok(4));
/// assert_eq!(subject.calls(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InstantSubject {
    calls: AtomicUsize,
}

impl InstantSubject {
    /// Number of `solve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Subject for InstantSubject {
    type Instance = Vec<u64>;
    type Target = u64;
    type Outcome = usize;

    fn name(&self) -> &str {
        "Instant"
    }

    fn expected_complexity(&self) -> ComplexityClass {
        ComplexityClass::Polynomial(0)
    }

    fn solve(&self, instance: &Vec<u64>, _: &u64) -> Result<usize, ResourceExhausted> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(instance.len())
    }
}

/// Generator producing `vec![seed; n]` and counting how often it is asked.
///
/// # Example
///
/// ```
/// use asymptote_core::{InstanceGenerator, InstanceReuse, ProblemSize};
/// use asymptote_test::CountingGenerator;
///
/// let mut generator = CountingGenerator::new(InstanceReuse::PerTrial);
/// let workload = generator.generate(ProblemSize::new(3).unwrap());
/// assert_eq!(workload.instance, vec![0, 0, 0]);
/// assert_eq!(workload.target, 1);
/// assert_eq!(generator.generated(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CountingGenerator {
    reuse: InstanceReuse,
    generated: usize,
}

impl CountingGenerator {
    pub fn new(reuse: InstanceReuse) -> Self {
        Self {
            reuse,
            generated: 0,
        }
    }

    /// Number of workloads generated so far.
    pub fn generated(&self) -> usize {
        self.generated
    }
}

impl InstanceGenerator for CountingGenerator {
    type Instance = Vec<u64>;
    type Target = u64;

    // The target is the running count, so reused and regenerated workloads
    // can be told apart.
    fn generate(&mut self, size: ProblemSize) -> Workload<Vec<u64>, u64> {
        self.generated += 1;
        Workload::new(vec![0; size.get()], self.generated as u64)
    }

    fn reuse(&self) -> InstanceReuse {
        self.reuse
    }
}

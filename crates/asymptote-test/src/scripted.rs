//! Scripted fixtures.
//!
//! The instance *is* the behaviour: a [`BehaviorSubject`] returns at once,
//! sleeps, or reports exhaustion depending on the [`Behavior`] it is handed.
//! A [`ScriptedGenerator`] hands out behaviours from a per-size script, so a
//! test can dictate exactly what happens on every trial.
//!
//! # Example
//!
//! ```
//! use asymptote_core::{InstanceGenerator, ProblemSize};
//! use asymptote_test::scripted::{Behavior, ScriptedGenerator};
//!
//! let mut generator = ScriptedGenerator::new(Behavior::Instant)
//!     .with_script(2, [Behavior::Exhaust]);
//!
//! let size = |n| ProblemSize::new(n).unwrap();
//! assert_eq!(generator.generate(size(2)).instance, Behavior::Exhaust);
//! assert_eq!(generator.generate(size(2)).instance, Behavior::Instant);
//! assert_eq!(generator.generate(size(1)).instance, Behavior::Instant);
//! ```

use std::collections::{HashMap, VecDeque};
use std::thread;
use std::time::Duration;

use asymptote_core::{
    ComplexityClass, InstanceGenerator, InstanceReuse, ProblemSize, ResourceExhausted, Subject,
    Workload,
};

/// What a [`BehaviorSubject`] does when called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Return immediately.
    Instant,
    /// Sleep for the given duration, then return.
    Sleep(Duration),
    /// Report resource exhaustion immediately.
    Exhaust,
}

impl Behavior {
    /// Shorthand for `Sleep(Duration::from_millis(ms))`.
    pub fn sleep_ms(ms: u64) -> Self {
        Self::Sleep(Duration::from_millis(ms))
    }
}

/// Subject that acts out the [`Behavior`] it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct BehaviorSubject;

impl Subject for BehaviorSubject {
    type Instance = Behavior;
    type Target = ();
    type Outcome = ();

    fn name(&self) -> &str {
        "Scripted"
    }

    fn expected_complexity(&self) -> ComplexityClass {
        ComplexityClass::Polynomial(0)
    }

    fn solve(&self, behavior: &Behavior, _: &()) -> Result<(), ResourceExhausted> {
        match behavior {
            Behavior::Instant => Ok(()),
            Behavior::Sleep(duration) => {
                thread::sleep(*duration);
                Ok(())
            }
            Behavior::Exhaust => Err(ResourceExhausted::new("scripted")),
        }
    }
}

/// Generator that replays a script of behaviours per size.
///
/// Each `generate` call pops the next behaviour scripted for that size, or
/// returns the fallback once the script runs out. Regenerates per trial by
/// default so every trial consumes one script entry.
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    scripts: HashMap<usize, VecDeque<Behavior>>,
    fallback: Behavior,
    reuse: InstanceReuse,
}

impl ScriptedGenerator {
    /// Creates a generator that always yields `fallback`.
    pub fn new(fallback: Behavior) -> Self {
        Self {
            scripts: HashMap::new(),
            fallback,
            reuse: InstanceReuse::PerTrial,
        }
    }

    /// Scripts the behaviours for successive generate calls at `size`.
    pub fn with_script(mut self, size: usize, script: impl IntoIterator<Item = Behavior>) -> Self {
        self.scripts.entry(size).or_default().extend(script);
        self
    }

    /// Sets the declared reuse policy.
    pub fn with_reuse(mut self, reuse: InstanceReuse) -> Self {
        self.reuse = reuse;
        self
    }
}

impl InstanceGenerator for ScriptedGenerator {
    type Instance = Behavior;
    type Target = ();

    fn generate(&mut self, size: ProblemSize) -> Workload<Behavior, ()> {
        let behavior = self
            .scripts
            .get_mut(&size.get())
            .and_then(VecDeque::pop_front)
            .unwrap_or(self.fallback);
        Workload::new(behavior, ())
    }

    fn reuse(&self) -> InstanceReuse {
        self.reuse
    }
}

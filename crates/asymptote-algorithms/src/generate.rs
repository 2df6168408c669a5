//! Seeded workload generators.
//!
//! Each stochastic generator owns a [`ChaCha8Rng`] so that two runs with the
//! same seed over the same size sequence see identical instances.

use asymptote_core::{InstanceGenerator, InstanceReuse, ProblemSize, Workload};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::shortest_path::Graph;

/// Generator construction error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("edge probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Subset Sum instances whose values all lie within 1000 ± 5.
///
/// The target is half the total, so many subsets come close and the
/// backtracking solver's pruning rarely fires early.
#[derive(Debug, Clone)]
pub struct NearEqualSubsetSum {
    rng: ChaCha8Rng,
}

impl NearEqualSubsetSum {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: create_rng(seed),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl InstanceGenerator for NearEqualSubsetSum {
    type Instance = Vec<u64>;
    type Target = u64;

    fn generate(&mut self, size: ProblemSize) -> Workload<Vec<u64>, u64> {
        let nums: Vec<u64> = (0..size.get())
            .map(|_| self.rng.random_range(995..=1005))
            .collect();
        let target = nums.iter().sum::<u64>() / 2;
        Workload::new(nums, target)
    }
}

/// Subset Sum instances with values drawn uniformly from 1..=1000 and a
/// target of one third of the total.
#[derive(Debug, Clone)]
pub struct RandomSubsetSum {
    rng: ChaCha8Rng,
}

impl RandomSubsetSum {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: create_rng(seed),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl InstanceGenerator for RandomSubsetSum {
    type Instance = Vec<u64>;
    type Target = u64;

    fn generate(&mut self, size: ProblemSize) -> Workload<Vec<u64>, u64> {
        let nums: Vec<u64> = (0..size.get())
            .map(|_| self.rng.random_range(1..=1000))
            .collect();
        let target = nums.iter().sum::<u64>() / 3;
        Workload::new(nums, target)
    }
}

/// Deterministic worst case: the first `n` primes with a target one past
/// their total.
///
/// No subset can reach the target, so every solver has to exhaust its search
/// space before answering `false`.
///
/// # Example
///
/// ```
/// use asymptote_algorithms::HardSubsetSum;
/// use asymptote_core::{InstanceGenerator, ProblemSize};
///
/// let w = HardSubsetSum.generate(ProblemSize::new(5).unwrap());
/// assert_eq!(w.instance, vec![2, 3, 5, 7, 11]);
/// assert_eq!(w.target, 29);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HardSubsetSum;

impl InstanceGenerator for HardSubsetSum {
    type Instance = Vec<u64>;
    type Target = u64;

    fn generate(&mut self, size: ProblemSize) -> Workload<Vec<u64>, u64> {
        let primes = first_primes(size.get());
        let target = primes.iter().sum::<u64>() + 1;
        Workload::new(primes, target)
    }
}

/// Returns the first `count` primes.
pub fn first_primes(count: usize) -> Vec<u64> {
    if count == 0 {
        return Vec::new();
    }

    // Rosser's bound: p_n < n (ln n + ln ln n) for n >= 6.
    let limit = if count < 6 {
        13
    } else {
        let n = count as f64;
        (n * (n.ln() + n.ln().ln())).ceil() as usize
    };

    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::with_capacity(count);
    for candidate in 2..=limit {
        if composite[candidate] {
            continue;
        }
        primes.push(candidate as u64);
        if primes.len() == count {
            break;
        }
        let mut multiple = candidate * candidate;
        while multiple <= limit {
            composite[multiple] = true;
            multiple += candidate;
        }
    }
    primes
}

/// Dense random directed graphs for shortest-path benchmarks.
///
/// Every ordered pair of distinct vertices gets an edge with probability `p`
/// and a weight in 1..=100. A fresh graph is drawn for every trial; the
/// source vertex is always 0.
#[derive(Debug, Clone)]
pub struct RandomGraph {
    rng: ChaCha8Rng,
    edge_probability: f64,
}

impl RandomGraph {
    /// Default probability that any given edge exists.
    pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.5;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: create_rng(seed),
            edge_probability: Self::DEFAULT_EDGE_PROBABILITY,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Sets the edge probability; must be a finite value in [0, 1].
    pub fn with_edge_probability(mut self, p: f64) -> Result<Self, GeneratorError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(GeneratorError::InvalidProbability(p));
        }
        self.edge_probability = p;
        Ok(self)
    }

    pub fn edge_probability(&self) -> f64 {
        self.edge_probability
    }
}

impl InstanceGenerator for RandomGraph {
    type Instance = Graph;
    type Target = usize;

    fn generate(&mut self, size: ProblemSize) -> Workload<Graph, usize> {
        let n = size.get();
        let mut graph = Graph::new(n);
        for from in 0..n {
            for to in 0..n {
                if from != to && self.rng.random_bool(self.edge_probability) {
                    let weight = self.rng.random_range(1..=100);
                    graph.push_edge(from, to, weight);
                }
            }
        }
        Workload::new(graph, 0)
    }

    fn reuse(&self) -> InstanceReuse {
        InstanceReuse::PerTrial
    }
}

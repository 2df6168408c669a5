//! Reference algorithm subjects and workload generators.
//!
//! - [`subset_sum`] - Subset Sum by backtracking, exhaustive search and dynamic programming
//! - [`shortest_path`] - Single-source shortest paths with Dijkstra's algorithm
//! - [`generate`] - Seeded instance generators for both problem families
//! - [`verify`] - Fixed correctness cases shared by tests and the command line tool
//!
//! Every subject implements [`asymptote_core::Subject`] and every generator
//! implements [`asymptote_core::InstanceGenerator`], so they plug straight
//! into the adaptive benchmark runner.

pub mod generate;
pub mod shortest_path;
pub mod subset_sum;
pub mod verify;

pub use generate::{GeneratorError, HardSubsetSum, NearEqualSubsetSum, RandomGraph, RandomSubsetSum};
pub use shortest_path::{Dijkstra, Distance, Distances, Edge, Graph, GraphError};
pub use subset_sum::{Backtracking, DynamicProgramming, Exhaustive};

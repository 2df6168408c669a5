//! Asymptote Core - Core types and traits for empirical complexity benchmarking
//!
//! This crate provides the fundamental abstractions shared by every other
//! Asymptote crate:
//! - [`ProblemSize`] for the nominal size of a generated instance
//! - [`Subject`] for the algorithm under measurement
//! - [`InstanceGenerator`] for producing problem instances of a given size
//! - [`ComplexityClass`] for the theoretical expectation reported next to a fit
//! - Error types ([`AsymptoteError`], [`ResourceExhausted`])

pub mod complexity;
pub mod error;
pub mod generator;
pub mod size;
pub mod subject;

pub use complexity::ComplexityClass;
pub use error::{AsymptoteError, ResourceExhausted, Result};
pub use generator::{InstanceGenerator, InstanceReuse, Workload};
pub use size::ProblemSize;
pub use subject::{FnSubject, Subject};

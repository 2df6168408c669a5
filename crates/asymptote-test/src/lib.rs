//! Shared test fixtures for Asymptote crates.
//!
//! This crate provides scripted subjects and generators for exercising the
//! benchmark runner without depending on real algorithm timings.
//!
//! - [`scripted`] - Subjects whose behaviour is dictated by the instance
//! - [`counting`] - Call-counting subjects and generators
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! asymptote-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use asymptote_test::scripted::{Behavior, BehaviorSubject, ScriptedGenerator};
//! use asymptote_test::counting::{CountingGenerator, InstantSubject};
//! ```

pub mod counting;
pub mod scripted;

// Re-export commonly used types at crate root for convenience
pub use counting::{CountingGenerator, InstantSubject};
pub use scripted::{Behavior, BehaviorSubject, ScriptedGenerator};

//! Fixed correctness cases.
//!
//! Small hand-checked inputs run against every solver before any timing is
//! trusted. A solver that is fast but wrong is not worth benchmarking.

use std::fmt;

use crate::shortest_path::{dijkstra, Distance, Graph};
use crate::subset_sum;

/// Outcome of one correctness case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{mark}] {}: {}", self.name, self.detail)
    }
}

/// Results of a full verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub cases: Vec<CaseResult>,
}

impl VerificationReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }

    fn record(&mut self, name: impl Into<String>, passed: bool, detail: impl Into<String>) {
        self.cases.push(CaseResult {
            name: name.into(),
            passed,
            detail: detail.into(),
        });
    }
}

/// Subset Sum cases as `(values, target, expected)`.
pub fn subset_sum_cases() -> Vec<(Vec<u64>, u64, bool)> {
    vec![
        (vec![1, 2, 3, 4], 7, true),
        (vec![1, 2, 3, 4], 11, false),
        (vec![3, 34, 4, 12, 5, 2], 9, true),
        (vec![3, 34, 4, 12, 5, 2], 35, false),
        ((1..=10).collect(), 30, true),
        ((1..=10).collect(), 60, false),
    ]
}

/// The four-vertex reference graph and its distances from vertex 0.
pub fn reference_graph() -> (Graph, Vec<Distance>) {
    let mut graph = Graph::new(4);
    for (from, to, weight) in [(0, 1, 4), (0, 2, 1), (1, 3, 1), (2, 1, 2), (2, 3, 5)] {
        graph.push_edge(from, to, weight);
    }
    let expected = [0, 3, 1, 4].map(Distance::Finite).to_vec();
    (graph, expected)
}

/// Runs every case against every solver.
///
/// # Example
///
/// ```
/// let report = asymptote_algorithms::verify::run_all();
/// assert!(report.all_passed());
/// assert_eq!(report.failed(), 0);
/// ```
pub fn run_all() -> VerificationReport {
    let mut report = VerificationReport::default();

    for (nums, target, expected) in subset_sum_cases() {
        let label = format!("subset sum {nums:?} -> {target}");

        let got = subset_sum::backtracking(&nums, target);
        report.record(
            format!("backtracking {label}"),
            got == expected,
            format!("expected {expected}, got {got}"),
        );

        let got = subset_sum::exhaustive(&nums, target);
        report.record(
            format!("exhaustive {label}"),
            got == expected,
            format!("expected {expected}, got {got}"),
        );

        match subset_sum::dynamic(&nums, target) {
            Ok(got) => report.record(
                format!("dynamic {label}"),
                got == expected,
                format!("expected {expected}, got {got}"),
            ),
            Err(e) => report.record(format!("dynamic {label}"), false, e.to_string()),
        }
    }

    let (graph, expected) = reference_graph();
    let distances = dijkstra(&graph, 0);
    let got: Vec<Distance> = distances.iter().map(|(_, d)| d).collect();
    report.record(
        "dijkstra reference graph",
        got == expected,
        format!("expected {expected:?}, got {got:?}"),
    );

    report
}

//! Single-source shortest paths.
//!
//! Dijkstra's algorithm over a weighted directed graph with non-negative
//! weights. Runs in O(E + V log V) with a binary heap, which for the dense
//! random graphs used in benchmarks is O(V^2).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::ops::Index;

use asymptote_core::{ComplexityClass, ResourceExhausted, Subject};
use thiserror::Error;

/// Graph construction error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge {from} -> {to} references a vertex outside 0..{vertex_count}")]
    VertexOutOfRange {
        from: usize,
        to: usize,
        vertex_count: usize,
    },
}

/// A weighted directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: usize,
    pub weight: u64,
}

/// Weighted directed graph as an adjacency list over vertices `0..n`.
///
/// # Example
///
/// ```
/// use asymptote_algorithms::Graph;
///
/// let graph = Graph::from_edges(3, [(0, 1, 4), (1, 2, 1)]).unwrap();
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(Graph::from_edges(2, [(0, 5, 1)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Builds a graph from `(from, to, weight)` triples.
    pub fn from_edges(
        vertex_count: usize,
        edges: impl IntoIterator<Item = (usize, usize, u64)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new(vertex_count);
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Adds a directed edge.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: u64) -> Result<(), GraphError> {
        let vertex_count = self.vertex_count();
        if from >= vertex_count || to >= vertex_count {
            return Err(GraphError::VertexOutOfRange {
                from,
                to,
                vertex_count,
            });
        }
        self.push_edge(from, to, weight);
        Ok(())
    }

    /// Adds an edge whose endpoints the caller has already bounds-checked.
    pub(crate) fn push_edge(&mut self, from: usize, to: usize, weight: u64) {
        self.adjacency[from].push(Edge { to, weight });
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Returns the outgoing edges of `vertex` (empty if out of range).
    pub fn neighbors(&self, vertex: usize) -> &[Edge] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }
}

/// Distance from the source to a vertex.
///
/// Ordered so that every finite distance is smaller than `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(u64),
    Unreachable,
}

impl Distance {
    /// Returns the finite distance, if any.
    pub fn finite(self) -> Option<u64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unreachable => None,
        }
    }

    /// Returns true for a finite distance.
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Finite(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(d) => write!(f, "{d}"),
            Self::Unreachable => write!(f, "inf"),
        }
    }
}

/// Distances from one source to every vertex of a graph.
///
/// Holds exactly one entry per vertex; unreachable vertices carry
/// [`Distance::Unreachable`] rather than being left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distances {
    source: usize,
    distances: Vec<Distance>,
}

impl Distances {
    /// Returns the source vertex.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the distance to `vertex`, or `None` if it is not a vertex of the graph.
    pub fn get(&self, vertex: usize) -> Option<Distance> {
        self.distances.get(vertex).copied()
    }

    /// Returns the number of vertices covered.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Returns true for a graph without vertices.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Returns the number of vertices reachable from the source.
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_reachable()).count()
    }

    /// Iterates over `(vertex, distance)` pairs in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Distance)> + '_ {
        self.distances.iter().copied().enumerate()
    }
}

impl Index<usize> for Distances {
    type Output = Distance;

    fn index(&self, vertex: usize) -> &Distance {
        &self.distances[vertex]
    }
}

/// Computes shortest distances from `source` to every vertex.
///
/// A source outside the graph reaches nothing: every vertex is `Unreachable`.
///
/// # Example
///
/// ```
/// use asymptote_algorithms::shortest_path::{dijkstra, Distance, Graph};
///
/// let graph = Graph::from_edges(
///     4,
///     [(0, 1, 4), (0, 2, 1), (1, 3, 1), (2, 1, 2), (2, 3, 5)],
/// )
/// .unwrap();
///
/// let distances = dijkstra(&graph, 0);
/// assert_eq!(distances[1], Distance::Finite(3));
/// assert_eq!(distances[3], Distance::Finite(4));
/// ```
pub fn dijkstra(graph: &Graph, source: usize) -> Distances {
    let mut distances = vec![Distance::Unreachable; graph.vertex_count()];
    let mut heap = BinaryHeap::new();

    if source < distances.len() {
        distances[source] = Distance::Finite(0);
        heap.push(Reverse((0u64, source)));
    }

    while let Some(Reverse((dist, vertex))) = heap.pop() {
        // Stale entry: a shorter path was already settled.
        if Distance::Finite(dist) > distances[vertex] {
            continue;
        }
        for edge in graph.neighbors(vertex) {
            let candidate = dist.saturating_add(edge.weight);
            if Distance::Finite(candidate) < distances[edge.to] {
                distances[edge.to] = Distance::Finite(candidate);
                heap.push(Reverse((candidate, edge.to)));
            }
        }
    }

    Distances { source, distances }
}

/// [`dijkstra`] as a benchmark subject. The target is the source vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Subject for Dijkstra {
    type Instance = Graph;
    type Target = usize;
    type Outcome = Distances;

    fn name(&self) -> &str {
        "Dijkstra"
    }

    fn expected_complexity(&self) -> ComplexityClass {
        ComplexityClass::Linearithmic
    }

    fn solve(&self, graph: &Graph, source: &usize) -> Result<Distances, ResourceExhausted> {
        Ok(dijkstra(graph, *source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_graph() -> Graph {
        Graph::from_edges(4, [(0, 1, 4), (0, 2, 1), (1, 3, 1), (2, 1, 2), (2, 3, 5)]).unwrap()
    }

    #[test]
    fn test_reference_distances() {
        let distances = dijkstra(&reference_graph(), 0);
        let got: Vec<_> = distances.iter().collect();
        assert_eq!(
            got,
            vec![
                (0, Distance::Finite(0)),
                (1, Distance::Finite(3)),
                (2, Distance::Finite(1)),
                (3, Distance::Finite(4)),
            ]
        );
    }

    #[test]
    fn test_unreachable_vertices_are_reported() {
        let graph = Graph::from_edges(4, [(0, 1, 2)]).unwrap();
        let distances = dijkstra(&graph, 0);

        assert_eq!(distances.len(), 4);
        assert_eq!(distances.get(2), Some(Distance::Unreachable));
        assert_eq!(distances.get(3), Some(Distance::Unreachable));
        assert_eq!(distances.reachable_count(), 2);
    }

    #[test]
    fn test_source_out_of_range_reaches_nothing() {
        let distances = dijkstra(&reference_graph(), 9);
        assert_eq!(distances.reachable_count(), 0);
        assert_eq!(distances.len(), 4);
    }

    #[test]
    fn test_zero_weight_edges() {
        let graph = Graph::from_edges(3, [(0, 1, 0), (1, 2, 0)]).unwrap();
        assert_eq!(dijkstra(&graph, 0)[2], Distance::Finite(0));
    }

    #[test]
    fn test_distance_ordering() {
        assert!(Distance::Finite(u64::MAX) < Distance::Unreachable);
        assert_eq!(Distance::Unreachable.to_string(), "inf");
        assert_eq!(Distance::Finite(7).finite(), Some(7));
    }

    #[test]
    fn test_add_edge_out_of_range() {
        let mut graph = Graph::new(2);
        let err = graph.add_edge(1, 2, 3).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                from: 1,
                to: 2,
                vertex_count: 2
            }
        );
        assert!(graph.neighbors(5).is_empty());
    }
}

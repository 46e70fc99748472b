//! Graph fixtures shared by unit, property, and benchmark suites.

use kindling_core::{Graph, VertexId};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Directed path `0 -> 1 -> ... -> len - 1`.
///
/// # Examples
/// ```
/// use kindling_test_support::graphs::path;
///
/// let graph = path(4);
/// assert_eq!(graph.vertex_count(), 4);
/// assert_eq!(graph.edge_count(), 3);
/// ```
#[must_use]
pub fn path(len: u64) -> Graph {
    let mut graph = Graph::from_edges((1..len).map(|target| (target - 1, target)));
    if len == 1 {
        graph.add_vertex(VertexId::new(0));
    }
    graph
}

/// Directed cycle on `len` vertices with a chord from every vertex to the one
/// `stride` places ahead.
#[must_use]
pub fn ring_with_chords(len: u64, stride: u64) -> Graph {
    Graph::from_edges(
        (0..len).flat_map(|source| [(source, (source + 1) % len), (source, (source + stride) % len)]),
    )
}

/// Random directed graph with `vertices` vertices and `edges` edges.
///
/// Every vertex id in `0..vertices` is present even when it has no edges.
/// Self-loops and parallel edges may occur.
///
/// # Examples
/// ```
/// use kindling_test_support::graphs::random;
///
/// let graph = random(10, 25, 3);
/// assert_eq!(graph.vertex_count(), 10);
/// assert_eq!(graph.edge_count(), 25);
/// assert_eq!(graph, random(10, 25, 3));
/// ```
#[must_use]
pub fn random(vertices: u64, edges: usize, seed: u64) -> Graph {
    let mut graph = Graph::new();
    for id in 0..vertices {
        graph.add_vertex(VertexId::new(id));
    }
    if vertices == 0 {
        return graph;
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..edges {
        let source = rng.gen_range(0..vertices);
        let target = rng.gen_range(0..vertices);
        graph.add_edge(VertexId::new(source), VertexId::new(target));
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::single(1, 1, 0)]
    #[case::short(3, 3, 2)]
    fn path_shapes(#[case] len: u64, #[case] vertices: usize, #[case] edges: usize) {
        let graph = path(len);
        assert_eq!(graph.vertex_count(), vertices);
        assert_eq!(graph.edge_count(), edges);
    }

    #[rstest]
    fn ring_closes_on_itself() {
        let graph = ring_with_chords(5, 2);
        assert!(graph.contains_edge(VertexId::new(4), VertexId::new(0)));
        assert!(graph.contains_edge(VertexId::new(4), VertexId::new(1)));
        assert_eq!(graph.edge_count(), 10);
    }
}

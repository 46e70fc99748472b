//! Append-only directed graph used as the working state of an evolution run.
//!
//! Vertices and edges are stored in insertion order so a run driven by a
//! fixed seed reproduces the same graph, and so the base graph's edges always
//! form a prefix of the grown graph's edge list.

use std::{collections::HashMap, fmt};

/// Identifier assigned to a vertex.
///
/// # Examples
/// ```
/// use kindling_core::VertexId;
///
/// let id = VertexId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a new vertex identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }

    /// Returns the identifier `offset` places after this one, or `None` when
    /// the identifier space is exhausted.
    ///
    /// # Examples
    /// ```
    /// use kindling_core::VertexId;
    ///
    /// assert_eq!(VertexId::new(3).checked_add(2), Some(VertexId::new(5)));
    /// assert_eq!(VertexId::new(u64::MAX).checked_add(1), None);
    /// ```
    #[must_use]
    pub const fn checked_add(self, offset: u64) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed edge from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
}

impl Edge {
    /// Creates an edge from `source` to `target`.
    #[must_use]
    pub const fn new(source: VertexId, target: VertexId) -> Self {
        Self { source, target }
    }

    /// Returns the tail of the edge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn source(&self) -> VertexId { self.source }

    /// Returns the head of the edge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn target(&self) -> VertexId { self.target }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Adjacency {
    outgoing: Vec<VertexId>,
    incoming: Vec<VertexId>,
}

/// Directed multigraph that only ever grows.
///
/// There is no removal API: every vertex and edge inserted stays in place, in
/// insertion order, for the lifetime of the graph.
///
/// # Examples
/// ```
/// use kindling_core::{Graph, VertexId};
///
/// let graph = Graph::from_edges([(0, 1), (1, 2), (2, 3)]);
/// assert_eq!(graph.vertex_count(), 4);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.out_neighbours(VertexId::new(1)), &[VertexId::new(2)]);
/// assert_eq!(graph.in_neighbours(VertexId::new(1)), &[VertexId::new(0)]);
/// assert_eq!(graph.max_vertex_id(), Some(VertexId::new(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    vertices: Vec<VertexId>,
    slots: HashMap<VertexId, usize>,
    adjacency: Vec<Adjacency>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(source, target)` pairs, inserting endpoints as
    /// vertices in first-seen order.
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = (u64, u64)>) -> Self {
        let mut graph = Self::new();
        for (source, target) in edges {
            graph.add_edge(VertexId::new(source), VertexId::new(target));
        }
        graph
    }

    /// Inserts `vertex` if it is not already present.
    ///
    /// Returns `true` when the vertex was newly added.
    pub fn add_vertex(&mut self, vertex: VertexId) -> bool {
        let known = self.contains_vertex(vertex);
        self.slot_or_insert(vertex);
        !known
    }

    /// Appends a directed edge, inserting either endpoint if missing.
    ///
    /// Parallel edges and self-loops are stored as given.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) {
        let source_slot = self.slot_or_insert(source);
        let target_slot = self.slot_or_insert(target);
        if let Some(entry) = self.adjacency.get_mut(source_slot) {
            entry.outgoing.push(target);
        }
        if let Some(entry) = self.adjacency.get_mut(target_slot) {
            entry.incoming.push(source);
        }
        self.edges.push(Edge::new(source, target));
    }

    fn slot_or_insert(&mut self, vertex: VertexId) -> usize {
        if let Some(&slot) = self.slots.get(&vertex) {
            return slot;
        }
        let slot = self.vertices.len();
        self.slots.insert(vertex, slot);
        self.vertices.push(vertex);
        self.adjacency.push(Adjacency::default());
        slot
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges, counting parallel edges separately.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertices in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Returns the edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the vertex stored at `index` in insertion order.
    #[must_use]
    pub fn vertex_at(&self, index: usize) -> Option<VertexId> {
        self.vertices.get(index).copied()
    }

    /// Returns whether `vertex` is present.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.slots.contains_key(&vertex)
    }

    /// Returns whether at least one edge runs from `source` to `target`.
    #[must_use]
    pub fn contains_edge(&self, source: VertexId, target: VertexId) -> bool {
        self.out_neighbours(source).contains(&target)
    }

    /// Returns the targets of edges leaving `vertex`, one entry per edge.
    ///
    /// Unknown vertices yield an empty slice.
    #[must_use]
    pub fn out_neighbours(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency_of(vertex)
            .map_or(&[], |entry| entry.outgoing.as_slice())
    }

    /// Returns the sources of edges entering `vertex`, one entry per edge.
    ///
    /// Unknown vertices yield an empty slice.
    #[must_use]
    pub fn in_neighbours(&self, vertex: VertexId) -> &[VertexId] {
        self.adjacency_of(vertex)
            .map_or(&[], |entry| entry.incoming.as_slice())
    }

    /// Returns the number of edges leaving `vertex`.
    #[must_use]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.out_neighbours(vertex).len()
    }

    /// Returns the largest vertex identifier, or `None` for an empty graph.
    #[must_use]
    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.vertices.iter().copied().max()
    }

    fn adjacency_of(&self, vertex: VertexId) -> Option<&Adjacency> {
        self.slots
            .get(&vertex)
            .and_then(|&slot| self.adjacency.get(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn v(id: u64) -> VertexId {
        VertexId::new(id)
    }

    #[rstest]
    fn from_edges_records_vertices_in_first_seen_order() {
        let graph = Graph::from_edges([(2, 0), (0, 1)]);
        assert_eq!(graph.vertices(), &[v(2), v(0), v(1)]);
        assert_eq!(graph.edges(), &[Edge::new(v(2), v(0)), Edge::new(v(0), v(1))]);
    }

    #[rstest]
    fn parallel_edges_are_kept() {
        let graph = Graph::from_edges([(0, 1), (0, 1)]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.out_neighbours(v(0)), &[v(1), v(1)]);
        assert_eq!(graph.in_neighbours(v(1)), &[v(0), v(0)]);
    }

    #[rstest]
    fn add_vertex_is_idempotent() {
        let mut graph = Graph::new();
        assert!(graph.add_vertex(v(7)));
        assert!(!graph.add_vertex(v(7)));
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.out_degree(v(7)), 0);
    }

    #[rstest]
    #[case::unknown(9, 0)]
    #[case::sink(3, 0)]
    #[case::inner(1, 1)]
    fn out_degree_matches_edges(#[case] vertex: u64, #[case] expected: usize) {
        let graph = Graph::from_edges([(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.out_degree(v(vertex)), expected);
    }

    #[rstest]
    fn unknown_vertices_have_no_neighbours() {
        let graph = Graph::from_edges([(0, 1)]);
        assert!(graph.out_neighbours(v(5)).is_empty());
        assert!(graph.in_neighbours(v(5)).is_empty());
        assert!(!graph.contains_edge(v(1), v(0)));
        assert!(graph.contains_edge(v(0), v(1)));
    }

    #[rstest]
    fn empty_graph_has_no_max_id() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.max_vertex_id(), None);
        assert_eq!(graph.vertex_at(0), None);
    }
}

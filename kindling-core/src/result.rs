//! Result types for evolution runs.

use crate::{
    fire::FireSpread,
    graph::{Graph, VertexId},
};

/// What happened when a single vertex joined the graph.
///
/// # Examples
/// ```
/// use kindling_core::{ForestFireBuilder, Graph, VertexId};
///
/// let model = ForestFireBuilder::new()
///     .with_new_vertices(1)
///     .with_forward_ratio(1.0)
///     .with_backward_ratio(1.0)
///     .build()
///     .expect("configuration is valid");
/// let evolution = model
///     .evolve(Graph::from_edges([(0, 1)]))
///     .expect("evolution succeeds");
/// let record = &evolution.records()[0];
/// assert_eq!(record.vertex(), VertexId::new(2));
/// assert_eq!(record.edges_added(), 0);
/// assert_eq!(record.out_degree(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthRecord {
    vertex: VertexId,
    ambassador: VertexId,
    spread: FireSpread,
}

impl GrowthRecord {
    pub(crate) const fn new(vertex: VertexId, ambassador: VertexId, spread: FireSpread) -> Self {
        Self {
            vertex,
            ambassador,
            spread,
        }
    }

    /// Returns the id assigned to the new vertex.
    #[rustfmt::skip]
    #[must_use]
    pub const fn vertex(&self) -> VertexId { self.vertex }

    /// Returns the vertex the fire was ignited from.
    #[rustfmt::skip]
    #[must_use]
    pub const fn ambassador(&self) -> VertexId { self.ambassador }

    /// Returns how many rounds the fire ran.
    #[rustfmt::skip]
    #[must_use]
    pub const fn rounds(&self) -> usize { self.spread.rounds() }

    /// Returns how many edges the fire added beyond the ambassador edge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn edges_added(&self) -> usize { self.spread.edges_added() }

    /// Returns the new vertex's out-degree immediately after it joined.
    #[must_use]
    pub const fn out_degree(&self) -> usize {
        self.spread.edges_added() + 1
    }
}

/// Represents the output of a [`crate::ForestFire::evolve`] invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evolution {
    graph: Graph,
    first_new_vertex: VertexId,
    records: Vec<GrowthRecord>,
}

impl Evolution {
    pub(crate) fn new(graph: Graph, first_new_vertex: VertexId, records: Vec<GrowthRecord>) -> Self {
        Self {
            graph,
            first_new_vertex,
            records,
        }
    }

    /// Returns the grown graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the result and returns the grown graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Returns the id of the first vertex added by the run.
    ///
    /// When no vertices were requested this is the id the first vertex would
    /// have received.
    #[must_use]
    pub fn first_new_vertex(&self) -> VertexId {
        self.first_new_vertex
    }

    /// Returns how many vertices the run added.
    #[must_use]
    pub fn vertices_added(&self) -> usize {
        self.records.len()
    }

    /// Returns one record per added vertex, in creation order.
    #[must_use]
    pub fn records(&self) -> &[GrowthRecord] {
        &self.records
    }

    /// Sums the rounds run across every fire.
    ///
    /// # Examples
    /// ```
    /// use kindling_core::{ForestFireBuilder, Graph};
    ///
    /// let evolution = ForestFireBuilder::new()
    ///     .with_new_vertices(3)
    ///     .build()
    ///     .expect("configuration is valid")
    ///     .evolve(Graph::from_edges([(0, 1), (1, 2)]))
    ///     .expect("evolution succeeds");
    /// let summed: usize = evolution.records().iter().map(|r| r.rounds()).sum();
    /// assert_eq!(evolution.total_rounds(), summed);
    /// ```
    #[must_use]
    pub fn total_rounds(&self) -> usize {
        self.records.iter().map(GrowthRecord::rounds).sum()
    }

    /// Counts every edge the run appended, ambassador edges included.
    #[must_use]
    pub fn edges_added(&self) -> usize {
        self.records.iter().map(GrowthRecord::out_degree).sum()
    }
}

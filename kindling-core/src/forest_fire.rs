//! Forest Fire evolution driver.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::ExecutionStrategy,
    error::EvolutionError,
    fire::{FireParams, FireSpread, propagate},
    format::GraphFormat,
    graph::{Graph, VertexId},
    result::{Evolution, GrowthRecord},
};

#[cfg(feature = "parallel")]
use crate::fire::propagate_parallel;

/// Grows a graph by attaching new vertices with the Forest Fire model.
///
/// New vertices join one at a time. Each picks a uniformly random ambassador
/// among every vertex already present, earlier new vertices included, links
/// to it, and then lets a fire spread from it. The outer loop is strictly
/// sequential because every fire reads the graph the previous ones grew.
///
/// # Examples
/// ```
/// use kindling_core::{ForestFireBuilder, Graph, VertexId};
///
/// let base = Graph::from_edges([(0, 1), (1, 2), (2, 3)]);
/// let model = ForestFireBuilder::new()
///     .with_max_id(VertexId::new(3))
///     .with_new_vertices(1)
///     .with_forward_ratio(0.5)
///     .with_backward_ratio(0.0)
///     .with_max_iterations(2)
///     .with_rng_seed(7)
///     .build()
///     .expect("configuration is valid");
/// let evolution = model.evolve(base.clone()).expect("evolution succeeds");
///
/// assert_eq!(evolution.first_new_vertex(), VertexId::new(4));
/// assert_eq!(&evolution.graph().edges()[..3], base.edges());
/// assert!(evolution.graph().out_degree(VertexId::new(4)) >= 1);
/// ```
#[derive(Debug, Clone)]
pub struct ForestFire {
    fire: FireParams,
    new_vertices: usize,
    max_id: Option<VertexId>,
    format: GraphFormat,
    execution_strategy: ExecutionStrategy,
    rng_seed: u64,
}

impl ForestFire {
    pub(crate) fn new(
        fire: FireParams,
        new_vertices: usize,
        max_id: Option<VertexId>,
        format: GraphFormat,
        execution_strategy: ExecutionStrategy,
        rng_seed: u64,
    ) -> Self {
        Self {
            fire,
            new_vertices,
            max_id,
            format,
            execution_strategy,
            rng_seed,
        }
    }

    /// Returns the fire parameters applied to every new vertex.
    #[must_use]
    pub fn fire(&self) -> FireParams {
        self.fire
    }

    /// Returns how many vertices each run adds.
    #[must_use]
    pub fn new_vertices(&self) -> usize {
        self.new_vertices
    }

    /// Returns the explicitly configured maximum id, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<VertexId> {
        self.max_id
    }

    /// Returns the input format this runner was configured for.
    #[must_use]
    pub fn format(&self) -> GraphFormat {
        self.format
    }

    /// Returns the execution strategy that will be used when evolving.
    ///
    /// # Examples
    /// ```
    /// use kindling_core::{ExecutionStrategy, ForestFireBuilder};
    ///
    /// let model = ForestFireBuilder::new()
    ///     .with_execution_strategy(ExecutionStrategy::Parallel)
    ///     .build()
    ///     .expect("builder must apply execution strategy");
    /// assert_eq!(model.execution_strategy(), ExecutionStrategy::Parallel);
    /// ```
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the seed [`Self::evolve`] uses for its random source.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Evolves `graph` using a `SmallRng` seeded from the configured seed.
    ///
    /// # Errors
    /// See [`Self::evolve_with_rng`].
    pub fn evolve(&self, graph: Graph) -> Result<Evolution> {
        let mut rng = SmallRng::seed_from_u64(self.rng_seed);
        self.evolve_with_rng(graph, &mut rng)
    }

    /// Evolves `graph`, drawing every random choice from `rng`.
    ///
    /// All checks run before the graph is touched, so an error never leaves a
    /// partially grown graph behind.
    ///
    /// # Errors
    /// Returns [`EvolutionError::UnsupportedFormat`] for vertex-based input,
    /// [`EvolutionError::BackendUnavailable`] when the parallel strategy is
    /// requested without the `parallel` feature,
    /// [`EvolutionError::MaxIdBelowExisting`] when the configured maximum id
    /// would collide with an existing vertex,
    /// [`EvolutionError::EmptyGraph`] when vertices are requested for an empty
    /// graph, and [`EvolutionError::IdSpaceExhausted`] when the new ids would
    /// overflow.
    ///
    /// # Examples
    /// ```
    /// use kindling_core::{EvolutionError, ForestFireBuilder, Graph, GraphFormat};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let model = ForestFireBuilder::new()
    ///     .with_format(GraphFormat::new(true, false))
    ///     .build()
    ///     .expect("configuration is valid");
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let err = model
    ///     .evolve_with_rng(Graph::from_edges([(0, 1)]), &mut rng)
    ///     .expect_err("vertex-based graphs are rejected");
    /// assert!(matches!(err, EvolutionError::UnsupportedFormat { .. }));
    /// ```
    #[instrument(
        name = "core.evolve",
        err,
        skip(self, graph, rng),
        fields(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            new_vertices = self.new_vertices,
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn evolve_with_rng<R: Rng + ?Sized>(
        &self,
        mut graph: Graph,
        rng: &mut R,
    ) -> Result<Evolution> {
        if !self.format.is_edge_based() {
            return Err(EvolutionError::UnsupportedFormat {
                format: self.format,
            });
        }
        let spread_fire = self.propagator::<R>()?;
        let max_id = self.resolve_max_id(&graph)?;
        if self.new_vertices > 0 && graph.is_empty() {
            return Err(EvolutionError::EmptyGraph {
                requested: self.new_vertices,
            });
        }
        let first_new_vertex = self.allocate_ids(max_id)?;

        let mut records = Vec::with_capacity(self.new_vertices);
        let mut vertex = first_new_vertex;
        for _ in 0..self.new_vertices {
            let Some(ambassador) = graph.vertex_at(rng.gen_range(0..graph.vertex_count())) else {
                return Err(EvolutionError::EmptyGraph {
                    requested: self.new_vertices,
                });
            };
            graph.add_edge(vertex, ambassador);
            let spread = spread_fire(&mut graph, vertex, ambassador, self.fire, &mut *rng);
            debug!(
                vertex = %vertex,
                ambassador = %ambassador,
                rounds = spread.rounds(),
                edges_added = spread.edges_added(),
                "vertex joined"
            );
            records.push(GrowthRecord::new(vertex, ambassador, spread));
            vertex = VertexId::new(vertex.get().wrapping_add(1));
        }

        let evolution = Evolution::new(graph, first_new_vertex, records);
        info!(
            vertices_added = evolution.vertices_added(),
            edges = evolution.graph().edge_count(),
            total_rounds = evolution.total_rounds(),
            "evolution completed"
        );
        Ok(evolution)
    }

    fn propagator<R: Rng + ?Sized>(
        &self,
    ) -> Result<fn(&mut Graph, VertexId, VertexId, FireParams, &mut R) -> FireSpread> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(propagate::<R>),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => Ok(propagate_parallel::<R>),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(EvolutionError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
        }
    }

    fn resolve_max_id(&self, graph: &Graph) -> Result<Option<VertexId>> {
        let existing = graph.max_vertex_id();
        match (self.max_id, existing) {
            (Some(max_id), Some(existing)) if max_id < existing => {
                Err(EvolutionError::MaxIdBelowExisting { max_id, existing })
            }
            (Some(max_id), _) => Ok(Some(max_id)),
            (None, existing) => Ok(existing),
        }
    }

    /// Returns the first new id after checking that the whole block fits.
    fn allocate_ids(&self, max_id: Option<VertexId>) -> Result<VertexId> {
        let Some(max_id) = max_id else {
            return Ok(VertexId::new(0));
        };
        let exhausted = || EvolutionError::IdSpaceExhausted {
            max_id,
            requested: self.new_vertices,
        };
        let span = u64::try_from(self.new_vertices).map_err(|_| exhausted())?;
        max_id.checked_add(span).ok_or_else(exhausted)?;
        max_id.checked_add(1).ok_or_else(exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::builder::ForestFireBuilder;
    use rstest::rstest;

    fn v(id: u64) -> VertexId {
        VertexId::new(id)
    }

    #[rstest]
    #[case::explicit(Some(10), 11)]
    #[case::inferred(None, 4)]
    fn new_ids_start_after_max_id(#[case] max_id: Option<u64>, #[case] expected: u64) {
        let mut builder = ForestFireBuilder::new().with_new_vertices(3);
        if let Some(id) = max_id {
            builder = builder.with_max_id(v(id));
        }
        let evolution = builder
            .build()
            .expect("configuration is valid")
            .evolve(Graph::from_edges([(0, 1), (3, 4)]))
            .expect("evolution succeeds");
        assert_eq!(evolution.first_new_vertex(), v(expected));
        let ids: Vec<VertexId> = evolution.records().iter().map(GrowthRecord::vertex).collect();
        assert_eq!(ids, [v(expected), v(expected + 1), v(expected + 2)]);
    }

    #[rstest]
    fn max_id_below_existing_is_rejected() {
        let err = ForestFireBuilder::new()
            .with_max_id(v(2))
            .build()
            .expect("configuration is valid")
            .evolve(Graph::from_edges([(0, 5)]))
            .expect_err("ids would collide");
        assert_eq!(
            err,
            EvolutionError::MaxIdBelowExisting {
                max_id: v(2),
                existing: v(5),
            }
        );
    }

    #[rstest]
    #[case::block_overflows(u64::MAX - 1, 2)]
    #[case::nothing_left(u64::MAX, 1)]
    fn overflowing_ids_are_rejected(#[case] max_id: u64, #[case] requested: usize) {
        let err = ForestFireBuilder::new()
            .with_max_id(v(max_id))
            .with_new_vertices(requested)
            .build()
            .expect("configuration is valid")
            .evolve(Graph::from_edges([(0, 1)]))
            .expect_err("ids would overflow");
        assert_eq!(err.code().as_str(), "EVOLUTION_ID_SPACE_EXHAUSTED");
    }

    #[rstest]
    fn last_id_may_reach_the_top_of_the_id_space() {
        let evolution = ForestFireBuilder::new()
            .with_max_id(v(u64::MAX - 2))
            .with_new_vertices(2)
            .build()
            .expect("configuration is valid")
            .evolve(Graph::from_edges([(0, 1)]))
            .expect("two ids remain");
        assert_eq!(evolution.records()[1].vertex(), v(u64::MAX));
    }

    #[rstest]
    fn empty_graph_cannot_supply_an_ambassador() {
        let err = ForestFireBuilder::new()
            .with_new_vertices(1)
            .build()
            .expect("configuration is valid")
            .evolve(Graph::new())
            .expect_err("no ambassador available");
        assert_eq!(err, EvolutionError::EmptyGraph { requested: 1 });
    }

    #[rstest]
    fn zero_new_vertices_returns_the_graph_untouched() {
        let base = Graph::from_edges([(0, 1), (1, 2)]);
        let evolution = ForestFireBuilder::new()
            .with_new_vertices(0)
            .build()
            .expect("configuration is valid")
            .evolve(base.clone())
            .expect("evolution succeeds");
        assert_eq!(evolution.graph(), &base);
        assert_eq!(evolution.vertices_added(), 0);
        assert_eq!(evolution.first_new_vertex(), v(3));
    }

    #[rstest]
    fn later_vertices_may_choose_earlier_new_vertices() {
        // A single base vertex forces the second arrival to pick between the
        // base vertex and the first arrival; across seeds both must occur.
        let mut base = Graph::new();
        base.add_vertex(v(0));
        let mut chose_new = false;
        let mut chose_base = false;
        for seed in 0..64 {
            let evolution = ForestFireBuilder::new()
                .with_new_vertices(2)
                .with_rng_seed(seed)
                .build()
                .expect("configuration is valid")
                .evolve(base.clone())
                .expect("evolution succeeds");
            match evolution.records()[1].ambassador().get() {
                0 => chose_base = true,
                1 => chose_new = true,
                other => panic!("unexpected ambassador {other}"),
            }
        }
        assert!(chose_new && chose_base);
    }

    #[cfg(not(feature = "parallel"))]
    #[rstest]
    fn parallel_strategy_requires_the_feature() {
        let err = ForestFireBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect("configuration is valid")
            .evolve(Graph::from_edges([(0, 1)]))
            .expect_err("parallel backend is compiled out");
        assert_eq!(
            err,
            EvolutionError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }
        );
    }
}

//! Fire propagation from a newly attached vertex.
//!
//! A fire starts at the ambassador and spreads in rounds. In each round every
//! burning vertex recruits forward and backward neighbours that have not yet
//! burnt; the recruits become the next round's frontier and each receives an
//! edge from the new vertex. Selection for a round reads the graph as it stood
//! before the round, and the round's edges are appended only once selection
//! has finished for every burning vertex.

#[cfg(feature = "parallel")]
mod parallel;
mod select;

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{instrument, trace};

use crate::graph::{Graph, VertexId};

pub use self::select::BurnDirection;
pub(crate) use self::select::select_neighbours;

#[cfg(feature = "parallel")]
pub use self::parallel::propagate_parallel;

/// Burning probabilities and round budget for one fire.
///
/// # Examples
/// ```
/// use kindling_core::FireParams;
///
/// let params = FireParams::new(0.5, 0.2, 3);
/// assert_eq!(params.forward_ratio(), 0.5);
/// assert_eq!(params.backward_ratio(), 0.2);
/// assert_eq!(params.max_iterations(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireParams {
    forward_ratio: f64,
    backward_ratio: f64,
    max_iterations: usize,
}

impl FireParams {
    /// Creates fire parameters without validation; out-of-range probabilities
    /// degrade as described on [`crate::geometric_count`].
    #[must_use]
    pub const fn new(forward_ratio: f64, backward_ratio: f64, max_iterations: usize) -> Self {
        Self {
            forward_ratio,
            backward_ratio,
            max_iterations,
        }
    }

    /// Returns the forward burning probability `p`.
    #[rustfmt::skip]
    #[must_use]
    pub const fn forward_ratio(&self) -> f64 { self.forward_ratio }

    /// Returns the backward burning probability `r`.
    #[rustfmt::skip]
    #[must_use]
    pub const fn backward_ratio(&self) -> f64 { self.backward_ratio }

    /// Returns the maximum number of rounds a fire may run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_iterations(&self) -> usize { self.max_iterations }
}

/// Outcome of propagating a single fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FireSpread {
    rounds: usize,
    edges_added: usize,
}

impl FireSpread {
    /// Returns how many rounds ran before the fire went out or hit the budget.
    #[rustfmt::skip]
    #[must_use]
    pub const fn rounds(&self) -> usize { self.rounds }

    /// Returns how many edges the fire appended, excluding the ambassador edge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn edges_added(&self) -> usize { self.edges_added }
}

/// Spreads a fire from `ambassador` on behalf of `new_vertex`.
///
/// Only edges leaving `new_vertex` are appended; existing edges are never
/// touched. `new_vertex` starts burnt, so it never links to itself, and a
/// recruited vertex is burnt at once so later rounds cannot recruit it again.
/// The ambassador starts burning rather than burnt, so a later round may
/// recruit it a second time.
///
/// # Examples
/// ```
/// use kindling_core::{FireParams, Graph, VertexId, propagate};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut graph = Graph::from_edges([(0, 1), (1, 2), (2, 3)]);
/// let new_vertex = VertexId::new(4);
/// graph.add_edge(new_vertex, VertexId::new(0));
///
/// // A vanishing forward ratio burns every out-neighbour, so two rounds reach 1
/// // and 2. A backward ratio of one burns nothing backward.
/// let mut rng = SmallRng::seed_from_u64(1);
/// let spread = propagate(
///     &mut graph,
///     new_vertex,
///     VertexId::new(0),
///     FireParams::new(1.0e-9, 1.0, 2),
///     &mut rng,
/// );
/// assert_eq!(spread.rounds(), 2);
/// assert_eq!(graph.out_neighbours(new_vertex), &[
///     VertexId::new(0),
///     VertexId::new(1),
///     VertexId::new(2),
/// ]);
/// ```
#[instrument(
    level = "trace",
    name = "core.propagate",
    skip_all,
    fields(new_vertex = %new_vertex, ambassador = %ambassador),
)]
pub fn propagate<R: Rng + ?Sized>(
    graph: &mut Graph,
    new_vertex: VertexId,
    ambassador: VertexId,
    params: FireParams,
    rng: &mut R,
) -> FireSpread {
    run_rounds(graph, new_vertex, ambassador, params, |graph, burning, burnt| {
        let mut selected = BTreeSet::new();
        for &vertex in burning {
            select_neighbours(
                graph,
                vertex,
                BurnDirection::Forward,
                params.forward_ratio,
                burnt,
                &mut selected,
                &mut *rng,
            );
            select_neighbours(
                graph,
                vertex,
                BurnDirection::Backward,
                params.backward_ratio,
                burnt,
                &mut selected,
                &mut *rng,
            );
        }
        selected
    })
}

/// Drives the round state machine shared by the sequential and parallel
/// propagators. `select_round` receives the graph, the current frontier, and
/// the burnt set, and returns the next frontier.
pub(crate) fn run_rounds<F>(
    graph: &mut Graph,
    new_vertex: VertexId,
    ambassador: VertexId,
    params: FireParams,
    mut select_round: F,
) -> FireSpread
where
    F: FnMut(&Graph, &BTreeSet<VertexId>, &BTreeSet<VertexId>) -> BTreeSet<VertexId>,
{
    let mut burnt = BTreeSet::from([new_vertex]);
    let mut burning = BTreeSet::from([ambassador]);
    let mut spread = FireSpread::default();

    while spread.rounds < params.max_iterations && !burning.is_empty() {
        let recruits = select_round(&*graph, &burning, &burnt);
        for &vertex in &recruits {
            graph.add_edge(new_vertex, vertex);
        }
        spread.edges_added += recruits.len();
        spread.rounds += 1;
        trace!(
            round = spread.rounds,
            recruits = recruits.len(),
            "fire round completed"
        );
        burnt.extend(recruits.iter().copied());
        burning = recruits;
    }
    spread
}

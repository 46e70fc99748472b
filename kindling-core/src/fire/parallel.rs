//! Rayon-backed selection phase for fire propagation.
//!
//! Each burning vertex draws from its own `SmallRng`, seeded from a per-round
//! seed mixed with the vertex id, so the outcome depends only on the caller's
//! RNG and never on how rayon schedules the work. Same-round deduplication
//! happens when the per-vertex picks are merged.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use tracing::instrument;

use crate::graph::{Graph, VertexId};

use super::{BurnDirection, FireParams, FireSpread, run_rounds, select_neighbours};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-vertex seed
/// derivation.
const VERTEX_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
pub(super) fn mix_vertex_seed(round_seed: u64, vertex: VertexId) -> u64 {
    splitmix64(round_seed ^ vertex.get().wrapping_add(1).wrapping_mul(VERTEX_SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(VERTEX_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Spreads a fire like [`super::propagate`], running each round's selection
/// phase across the rayon thread pool.
///
/// Every burning vertex deduplicates against the burnt set and its own picks;
/// picks made by different burning vertices in the same round are merged as a
/// set. The caller's RNG is consulted once per round for the round seed.
///
/// # Examples
/// ```
/// use kindling_core::{FireParams, Graph, VertexId, propagate_parallel};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut graph = Graph::from_edges([(0, 1), (0, 2), (1, 3), (2, 3)]);
/// let new_vertex = VertexId::new(4);
/// graph.add_edge(new_vertex, VertexId::new(0));
///
/// let mut rng = SmallRng::seed_from_u64(9);
/// let spread = propagate_parallel(
///     &mut graph,
///     new_vertex,
///     VertexId::new(0),
///     FireParams::new(1.0e-9, 1.0, 5),
///     &mut rng,
/// );
/// // Rounds: {1, 2}, then {3}, then nothing left to burn.
/// assert_eq!(spread.rounds(), 3);
/// assert_eq!(spread.edges_added(), 3);
/// ```
#[instrument(
    level = "trace",
    name = "core.propagate_parallel",
    skip_all,
    fields(new_vertex = %new_vertex, ambassador = %ambassador),
)]
pub fn propagate_parallel<R: Rng + ?Sized>(
    graph: &mut Graph,
    new_vertex: VertexId,
    ambassador: VertexId,
    params: FireParams,
    rng: &mut R,
) -> FireSpread {
    run_rounds(graph, new_vertex, ambassador, params, |graph, burning, burnt| {
        let round_seed = rng.next_u64();
        select_round_parallel(graph, burning, burnt, params, round_seed)
    })
}

fn select_round_parallel(
    graph: &Graph,
    burning: &BTreeSet<VertexId>,
    burnt: &BTreeSet<VertexId>,
    params: FireParams,
    round_seed: u64,
) -> BTreeSet<VertexId> {
    let frontier: Vec<VertexId> = burning.iter().copied().collect();
    frontier
        .par_iter()
        .map(|&vertex| {
            let mut rng = SmallRng::seed_from_u64(mix_vertex_seed(round_seed, vertex));
            let mut picks = BTreeSet::new();
            select_neighbours(
                graph,
                vertex,
                BurnDirection::Forward,
                params.forward_ratio(),
                burnt,
                &mut picks,
                &mut rng,
            );
            select_neighbours(
                graph,
                vertex,
                BurnDirection::Backward,
                params.backward_ratio(),
                burnt,
                &mut picks,
                &mut rng,
            );
            picks
        })
        .reduce(BTreeSet::new, |mut merged, picks| {
            merged.extend(picks);
            merged
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn vertex_seeds_differ_per_vertex() {
        let a = mix_vertex_seed(17, VertexId::new(0));
        let b = mix_vertex_seed(17, VertexId::new(1));
        assert_ne!(a, b);
        assert_eq!(a, mix_vertex_seed(17, VertexId::new(0)));
    }

    #[rstest]
    fn thread_count_does_not_change_the_outcome() {
        let base = Graph::from_edges((0..40_u64).flat_map(|i| [(i, (i + 1) % 40), (i, (i * 7) % 40)]));
        let run = |threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .expect("thread pool must build");
            pool.install(|| {
                let mut graph = base.clone();
                let new_vertex = VertexId::new(40);
                graph.add_edge(new_vertex, VertexId::new(3));
                let mut rng = SmallRng::seed_from_u64(1234);
                propagate_parallel(
                    &mut graph,
                    new_vertex,
                    VertexId::new(3),
                    FireParams::new(0.3, 0.6, 4),
                    &mut rng,
                );
                graph
            })
        };
        assert_eq!(run(1), run(4));
    }
}

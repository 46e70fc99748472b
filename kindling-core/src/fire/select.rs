//! Neighbour selection for a single burning vertex.

use std::collections::BTreeSet;

use rand::{Rng, seq::SliceRandom};

use crate::{
    graph::{Graph, VertexId},
    sampler::geometric_count,
};

/// Which edges a burning vertex follows when recruiting neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BurnDirection {
    /// Follow outgoing edges; candidates are edge targets.
    Forward,
    /// Follow incoming edges; candidates are edge sources.
    Backward,
}

/// Recruits neighbours of `vertex` into `selected`.
///
/// Candidates already in `burnt` or already in `selected` are skipped. The
/// recruitment count is drawn before the candidates are shuffled, and every
/// remaining candidate has the same chance of being picked regardless of the
/// order its edge was inserted. Returns how many vertices were added to
/// `selected`.
pub(crate) fn select_neighbours<R: Rng + ?Sized>(
    graph: &Graph,
    vertex: VertexId,
    direction: BurnDirection,
    ratio: f64,
    burnt: &BTreeSet<VertexId>,
    selected: &mut BTreeSet<VertexId>,
    rng: &mut R,
) -> usize {
    let count = geometric_count(rng, ratio);
    let neighbours = match direction {
        BurnDirection::Forward => graph.out_neighbours(vertex),
        BurnDirection::Backward => graph.in_neighbours(vertex),
    };
    let mut candidates: Vec<VertexId> = neighbours
        .iter()
        .copied()
        .filter(|candidate| !burnt.contains(candidate) && !selected.contains(candidate))
        .collect();
    candidates.shuffle(rng);
    candidates.truncate(count);

    let before = selected.len();
    selected.extend(candidates);
    selected.len() - before
}

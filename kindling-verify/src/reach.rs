use std::collections::{BTreeSet, HashSet, VecDeque};

use kindling_core::{Graph, VertexId};

/// Returns whether every vertex in `targets` lies within `limit` undirected
/// hops of `start`, walking around `avoid`.
pub(crate) fn reaches_all_within(
    graph: &Graph,
    start: VertexId,
    targets: &BTreeSet<VertexId>,
    limit: usize,
    avoid: VertexId,
) -> bool {
    let mut remaining: BTreeSet<VertexId> = targets.clone();
    remaining.remove(&start);
    let mut seen = HashSet::from([start, avoid]);
    let mut frontier = VecDeque::from([(start, 0_usize)]);

    while let Some((vertex, depth)) = frontier.pop_front() {
        if remaining.is_empty() {
            return true;
        }
        if depth == limit {
            continue;
        }
        let neighbours = graph
            .out_neighbours(vertex)
            .iter()
            .chain(graph.in_neighbours(vertex));
        for &next in neighbours {
            if seen.insert(next) {
                remaining.remove(&next);
                frontier.push_back((next, depth + 1));
            }
        }
    }
    remaining.is_empty()
}

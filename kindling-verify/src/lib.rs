//! Checks that an evolved graph is consistent with a Forest Fire run.
//!
//! The checks need only the original graph, the result, and the numbers a run
//! reports, so they also apply to graphs produced by other tools.

mod error;
mod reach;

use std::collections::{BTreeSet, HashMap};

use kindling_core::{Edge, Graph, VertexId};
use tracing::{debug, instrument};

pub use crate::error::{VerificationError, VerificationErrorCode};
use crate::reach::reaches_all_within;

/// Totals gathered while verifying a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
    original_vertices: usize,
    original_edges: usize,
    new_vertices: usize,
    new_edges: usize,
}

impl VerificationReport {
    /// Returns how many original vertices were confirmed present.
    #[must_use]
    pub fn original_vertices(&self) -> usize {
        self.original_vertices
    }

    /// Returns how many original edges were confirmed present.
    #[must_use]
    pub fn original_edges(&self) -> usize {
        self.original_edges
    }

    /// Returns how many new vertices were checked.
    #[must_use]
    pub fn new_vertices(&self) -> usize {
        self.new_vertices
    }

    /// Returns how many edges leave the new vertices.
    #[must_use]
    pub fn new_edges(&self) -> usize {
        self.new_edges
    }
}

/// Verifies that `result` is a plausible Forest Fire evolution of `original`.
///
/// The checks run in order and the first failure is returned:
/// 1. every original vertex, and every original edge with its multiplicity,
///    is still present;
/// 2. the result gained exactly `vertices_added` vertices, with ids
///    `first_new..first_new + vertices_added` absent from `original` and
///    present in `result`;
/// 3. every new vertex has at least one out-edge, links only to older ids,
///    and has a neighbour from which all its other neighbours lie within
///    `max_iterations` undirected hops that avoid the new vertex itself.
///
/// # Errors
/// Returns the [`VerificationError`] describing the first failed check.
///
/// # Examples
/// ```
/// use kindling_core::{ForestFireBuilder, Graph};
/// use kindling_verify::verify_evolution;
///
/// let original = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]);
/// let evolution = ForestFireBuilder::new()
///     .with_new_vertices(8)
///     .build()
///     .expect("configuration is valid")
///     .evolve(original.clone())
///     .expect("evolution succeeds");
/// let report = verify_evolution(
///     &original,
///     evolution.graph(),
///     evolution.first_new_vertex(),
///     evolution.vertices_added(),
///     2,
/// )
/// .expect("a genuine run verifies");
/// assert_eq!(report.new_vertices(), 8);
/// ```
#[instrument(
    name = "verify.evolution",
    err,
    skip(original, result, first_new),
    fields(first_new = %first_new),
)]
pub fn verify_evolution(
    original: &Graph,
    result: &Graph,
    first_new: VertexId,
    vertices_added: usize,
    max_iterations: usize,
) -> Result<VerificationReport, VerificationError> {
    verify_original_unchanged(original, result)?;
    let new_vertices = verify_new_vertices(original, result, first_new, vertices_added)?;
    let mut new_edges = 0;
    for &vertex in &new_vertices {
        new_edges += verify_new_edges(result, vertex, max_iterations)?;
    }
    let report = VerificationReport {
        original_vertices: original.vertex_count(),
        original_edges: original.edge_count(),
        new_vertices: new_vertices.len(),
        new_edges,
    };
    debug!(?report, "evolution verified");
    Ok(report)
}

fn verify_original_unchanged(original: &Graph, result: &Graph) -> Result<(), VerificationError> {
    if let Some(&vertex) = original
        .vertices()
        .iter()
        .find(|&&vertex| !result.contains_vertex(vertex))
    {
        return Err(VerificationError::MissingVertex { vertex });
    }

    let expected = edge_counts(original.edges());
    let found = edge_counts(result.edges());
    // Report in original edge order so the first missing edge is stable.
    for edge in original.edges() {
        let want = expected.get(edge).copied().unwrap_or_default();
        let have = found.get(edge).copied().unwrap_or_default();
        if have < want {
            return Err(VerificationError::MissingEdge {
                from: edge.source(),
                to: edge.target(),
                expected: want,
                found: have,
            });
        }
    }
    Ok(())
}

fn edge_counts(edges: &[Edge]) -> HashMap<Edge, usize> {
    let mut counts = HashMap::with_capacity(edges.len());
    for &edge in edges {
        *counts.entry(edge).or_default() += 1;
    }
    counts
}

fn verify_new_vertices(
    original: &Graph,
    result: &Graph,
    first_new: VertexId,
    vertices_added: usize,
) -> Result<Vec<VertexId>, VerificationError> {
    let found = result.vertex_count().saturating_sub(original.vertex_count());
    if found != vertices_added {
        return Err(VerificationError::VertexCountMismatch {
            expected: vertices_added,
            found,
        });
    }

    let overflow = || VerificationError::IdRangeOverflow {
        first: first_new,
        count: vertices_added,
    };
    let count = u64::try_from(vertices_added).map_err(|_| overflow())?;
    let mut ids = Vec::with_capacity(vertices_added);
    for offset in 0..count {
        let vertex = first_new.checked_add(offset).ok_or_else(overflow)?;
        if original.contains_vertex(vertex) {
            return Err(VerificationError::AlreadyPresent { vertex });
        }
        if !result.contains_vertex(vertex) {
            return Err(VerificationError::NotAdded { vertex });
        }
        ids.push(vertex);
    }
    Ok(ids)
}

/// Checks one new vertex and returns its out-degree.
fn verify_new_edges(
    result: &Graph,
    vertex: VertexId,
    max_iterations: usize,
) -> Result<usize, VerificationError> {
    let targets = result.out_neighbours(vertex);
    if let Some(&target) = targets.iter().find(|&&target| target >= vertex) {
        return Err(VerificationError::EdgeToNewerVertex { vertex, target });
    }
    if targets.is_empty() {
        return Err(VerificationError::Disconnected { vertex });
    }

    let distinct: BTreeSet<VertexId> = targets.iter().copied().collect();
    let explained = distinct
        .iter()
        .any(|&candidate| reaches_all_within(result, candidate, &distinct, max_iterations, vertex));
    if !explained {
        return Err(VerificationError::NoPotentialAmbassador {
            vertex,
            max_iterations,
        });
    }
    Ok(targets.len())
}

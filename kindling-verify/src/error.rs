use kindling_core::VertexId;
use thiserror::Error;

/// The first check an evolved graph failed.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum VerificationError {
    /// A vertex of the original graph is absent from the result.
    #[error("original vertex {vertex} is missing from the result graph")]
    MissingVertex {
        /// The absent vertex.
        vertex: VertexId,
    },
    /// An original edge appears fewer times in the result than in the input.
    #[error("original edge {from} -> {to} appears {found} time(s) in the result but {expected} in the input")]
    MissingEdge {
        /// Edge source.
        from: VertexId,
        /// Edge target.
        to: VertexId,
        /// Copies in the original graph.
        expected: usize,
        /// Copies in the result graph.
        found: usize,
    },
    /// The result holds a different number of new vertices than reported.
    #[error("expected {expected} new vertices but the result graph has {found}")]
    VertexCountMismatch {
        /// Number of vertices the run reported adding.
        expected: usize,
        /// Number of vertices the result graph gained.
        found: usize,
    },
    /// The reported id range does not fit in the identifier space.
    #[error("new vertex range starting at {first} with {count} vertices overflows")]
    IdRangeOverflow {
        /// First reported id.
        first: VertexId,
        /// Number of reported vertices.
        count: usize,
    },
    /// A supposedly new id was already used by the original graph.
    #[error("vertex {vertex} should be new but was already in the original graph")]
    AlreadyPresent {
        /// The clashing id.
        vertex: VertexId,
    },
    /// A supposedly new id is absent from the result.
    #[error("vertex {vertex} should have been added but is not in the result graph")]
    NotAdded {
        /// The absent id.
        vertex: VertexId,
    },
    /// A new vertex links to a vertex that is not older than itself.
    #[error("new vertex {vertex} links to vertex {target}, which is not older")]
    EdgeToNewerVertex {
        /// The new vertex.
        vertex: VertexId,
        /// The offending target.
        target: VertexId,
    },
    /// A new vertex has no outgoing edge.
    #[error("new vertex {vertex} is not connected to any vertex")]
    Disconnected {
        /// The isolated vertex.
        vertex: VertexId,
    },
    /// No neighbour of a new vertex reaches all the others within the round
    /// budget, so no ambassador could have produced its edges.
    #[error("neighbours of new vertex {vertex} are not within {max_iterations} hops of any potential ambassador")]
    NoPotentialAmbassador {
        /// The new vertex.
        vertex: VertexId,
        /// Round budget the run used.
        max_iterations: usize,
    },
}

impl VerificationError {
    /// Returns a stable, machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> VerificationErrorCode {
        match self {
            Self::MissingVertex { .. } => VerificationErrorCode::MissingVertex,
            Self::MissingEdge { .. } => VerificationErrorCode::MissingEdge,
            Self::VertexCountMismatch { .. } => VerificationErrorCode::VertexCountMismatch,
            Self::IdRangeOverflow { .. } => VerificationErrorCode::IdRangeOverflow,
            Self::AlreadyPresent { .. } => VerificationErrorCode::AlreadyPresent,
            Self::NotAdded { .. } => VerificationErrorCode::NotAdded,
            Self::EdgeToNewerVertex { .. } => VerificationErrorCode::EdgeToNewerVertex,
            Self::Disconnected { .. } => VerificationErrorCode::Disconnected,
            Self::NoPotentialAmbassador { .. } => VerificationErrorCode::NoPotentialAmbassador,
        }
    }
}

/// Machine-readable error codes for [`VerificationError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VerificationErrorCode {
    /// An original vertex is missing.
    MissingVertex,
    /// An original edge is missing.
    MissingEdge,
    /// The number of new vertices differs from the report.
    VertexCountMismatch,
    /// The reported id range overflows.
    IdRangeOverflow,
    /// A new id clashes with the original graph.
    AlreadyPresent,
    /// A new id is absent from the result.
    NotAdded,
    /// A new vertex links forward in time.
    EdgeToNewerVertex,
    /// A new vertex has no out-edge.
    Disconnected,
    /// No potential ambassador explains a vertex's edges.
    NoPotentialAmbassador,
}

impl VerificationErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingVertex => "VERIFY_MISSING_VERTEX",
            Self::MissingEdge => "VERIFY_MISSING_EDGE",
            Self::VertexCountMismatch => "VERIFY_VERTEX_COUNT_MISMATCH",
            Self::IdRangeOverflow => "VERIFY_ID_RANGE_OVERFLOW",
            Self::AlreadyPresent => "VERIFY_ALREADY_PRESENT",
            Self::NotAdded => "VERIFY_NOT_ADDED",
            Self::EdgeToNewerVertex => "VERIFY_EDGE_TO_NEWER_VERTEX",
            Self::Disconnected => "VERIFY_DISCONNECTED",
            Self::NoPotentialAmbassador => "VERIFY_NO_POTENTIAL_AMBASSADOR",
        }
    }
}

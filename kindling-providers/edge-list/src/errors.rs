use std::{io, num::ParseIntError};

use thiserror::Error;

/// Errors raised while reading or writing an edge list.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// A data line held fewer than two endpoints.
    #[error("line {line}: expected `source target` but found {found} token(s)")]
    MissingEndpoint {
        /// One-based line number.
        line: usize,
        /// Number of tokens present.
        found: usize,
    },
    /// A data line held more than two tokens.
    #[error("line {line}: unexpected trailing token `{token}`")]
    TrailingToken {
        /// One-based line number.
        line: usize,
        /// First token after the two endpoints.
        token: String,
    },
    /// An endpoint was not an unsigned 64-bit integer.
    #[error("line {line}: `{token}` is not a valid vertex id")]
    InvalidVertexId {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
        /// Parser failure.
        #[source]
        source: ParseIntError,
    },
    /// The input contained no edges.
    #[error("edge list contains no edges")]
    EmptyInput,
    /// Reading or writing failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl EdgeListError {
    /// Returns a stable, machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> EdgeListErrorCode {
        match self {
            Self::MissingEndpoint { .. } => EdgeListErrorCode::MissingEndpoint,
            Self::TrailingToken { .. } => EdgeListErrorCode::TrailingToken,
            Self::InvalidVertexId { .. } => EdgeListErrorCode::InvalidVertexId,
            Self::EmptyInput => EdgeListErrorCode::EmptyInput,
            Self::Io(_) => EdgeListErrorCode::Io,
        }
    }
}

/// Machine-readable error codes for [`EdgeListError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeListErrorCode {
    /// A line held fewer than two endpoints.
    MissingEndpoint,
    /// A line held more than two tokens.
    TrailingToken,
    /// An endpoint failed to parse.
    InvalidVertexId,
    /// No edges were found.
    EmptyInput,
    /// An I/O operation failed.
    Io,
}

impl EdgeListErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingEndpoint => "EDGE_LIST_MISSING_ENDPOINT",
            Self::TrailingToken => "EDGE_LIST_TRAILING_TOKEN",
            Self::InvalidVertexId => "EDGE_LIST_INVALID_VERTEX_ID",
            Self::EmptyInput => "EDGE_LIST_EMPTY_INPUT",
            Self::Io => "EDGE_LIST_IO",
        }
    }
}

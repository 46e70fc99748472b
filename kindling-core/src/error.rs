//! Error types for the kindling core library.
//!
//! Every failure is a configuration problem detected before the working graph
//! is mutated; sampling degeneracy, empty frontiers, and an exhausted round
//! budget are ordinary outcomes and never surface here.

use std::fmt;

use thiserror::Error;

use crate::{builder::ExecutionStrategy, format::GraphFormat, graph::VertexId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring or running [`crate::ForestFire`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EvolutionError {
    /// The input graph is stored in a format the model cannot evolve.
    #[error("graph format {format} is not supported; only edge-based graphs can be evolved")]
    UnsupportedFormat {
        /// Format flags supplied by the caller.
        format: GraphFormat,
    },
    /// The configured maximum id is smaller than an id already in the graph,
    /// so new vertices would collide with existing ones.
    #[error("max_id {max_id} is below existing vertex {existing}")]
    MaxIdBelowExisting {
        /// Maximum id supplied by the caller.
        max_id: VertexId,
        /// Largest id present in the graph.
        existing: VertexId,
    },
    /// The new vertex ids would overflow the identifier space.
    #[error("cannot allocate {requested} vertex ids after {max_id}")]
    IdSpaceExhausted {
        /// Largest id in use before evolution.
        max_id: VertexId,
        /// Number of new vertices requested.
        requested: usize,
    },
    /// New vertices were requested but the graph has no vertex to act as an
    /// ambassador.
    #[error("cannot add {requested} vertices to an empty graph")]
    EmptyGraph {
        /// Number of new vertices requested.
        requested: usize,
    },
    /// A burning probability was NaN.
    #[error("{parameter} must be a number")]
    NanProbability {
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Stable codes describing [`EvolutionError`] variants.
    enum EvolutionErrorCode for EvolutionError {
        /// The input graph is stored in a format the model cannot evolve.
        UnsupportedFormat => UnsupportedFormat { .. } => "EVOLUTION_UNSUPPORTED_FORMAT",
        /// The configured maximum id is below an existing id.
        MaxIdBelowExisting => MaxIdBelowExisting { .. } => "EVOLUTION_MAX_ID_BELOW_EXISTING",
        /// The new vertex ids would overflow.
        IdSpaceExhausted => IdSpaceExhausted { .. } => "EVOLUTION_ID_SPACE_EXHAUSTED",
        /// New vertices were requested for an empty graph.
        EmptyGraph => EmptyGraph { .. } => "EVOLUTION_EMPTY_GRAPH",
        /// A burning probability was NaN.
        NanProbability => NanProbability { .. } => "EVOLUTION_NAN_PROBABILITY",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "EVOLUTION_BACKEND_UNAVAILABLE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, EvolutionError>;

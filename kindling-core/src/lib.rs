//! Kindling core library: Forest Fire graph evolution.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod fire;
mod forest_fire;
mod format;
mod graph;
mod result;
mod sampler;

pub use crate::{
    builder::{DEFAULT_RNG_SEED, ExecutionStrategy, ForestFireBuilder},
    error::{EvolutionError, EvolutionErrorCode, Result},
    fire::{BurnDirection, FireParams, FireSpread, propagate},
    forest_fire::ForestFire,
    format::GraphFormat,
    graph::{Edge, Graph, VertexId},
    result::{Evolution, GrowthRecord},
    sampler::geometric_count,
};

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub use crate::fire::propagate_parallel;

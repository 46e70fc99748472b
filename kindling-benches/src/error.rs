//! Benchmark setup error type.

use kindling_core::EvolutionError;

/// Errors that may occur while preparing a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Model configuration was rejected.
    #[error("model configuration failed: {0}")]
    Evolution(#[from] EvolutionError),
}

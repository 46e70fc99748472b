//! Benchmark parameter types.

use std::fmt;

use kindling_core::ExecutionStrategy;

/// Parameters for one evolution benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct EvolveBenchParams {
    /// Vertices in the base graph.
    pub base_vertices: u64,
    /// Vertices added per run.
    pub new_vertices: usize,
    /// Selection strategy.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for EvolveBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            ExecutionStrategy::Sequential => "seq",
            ExecutionStrategy::Parallel => "par",
        };
        write!(
            f,
            "n={},add={},{strategy}",
            self.base_vertices, self.new_vertices
        )
    }
}

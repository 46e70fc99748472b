//! Builder utilities for configuring Forest Fire evolution runs.
//!
//! Exposes the execution strategy selection surface and the validation applied
//! before a [`ForestFire`] runner is constructed.

use tracing::warn;

use crate::{
    Result,
    error::EvolutionError,
    fire::FireParams,
    forest_fire::ForestFire,
    format::GraphFormat,
    graph::VertexId,
};

/// Seed used when the caller does not supply one.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_F1AE;

/// Selects how the selection phase of each fire round is executed.
///
/// Both strategies are deterministic under a fixed seed, but they consume the
/// random source differently and therefore grow different graphs from the
/// same seed.
///
/// # Examples
/// ```
/// use kindling_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Process burning vertices one after another on the calling thread.
    #[default]
    Sequential,
    /// Fan the selection phase out across the rayon thread pool.
    Parallel,
}

/// Configures and constructs [`ForestFire`] runners.
///
/// # Examples
/// ```
/// use kindling_core::{ExecutionStrategy, ForestFireBuilder, VertexId};
///
/// let model = ForestFireBuilder::new()
///     .with_forward_ratio(0.4)
///     .with_backward_ratio(0.2)
///     .with_max_iterations(3)
///     .with_new_vertices(10)
///     .with_max_id(VertexId::new(99))
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(model.new_vertices(), 10);
/// assert_eq!(model.fire().max_iterations(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ForestFireBuilder {
    forward_ratio: f64,
    backward_ratio: f64,
    max_iterations: usize,
    new_vertices: usize,
    max_id: Option<VertexId>,
    format: GraphFormat,
    execution_strategy: ExecutionStrategy,
    rng_seed: u64,
}

impl Default for ForestFireBuilder {
    fn default() -> Self {
        Self {
            forward_ratio: 0.5,
            backward_ratio: 0.5,
            max_iterations: 2,
            new_vertices: 50,
            max_id: None,
            format: GraphFormat::default(),
            execution_strategy: ExecutionStrategy::Sequential,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl ForestFireBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use kindling_core::ForestFireBuilder;
    ///
    /// let builder = ForestFireBuilder::new();
    /// assert_eq!(builder.forward_ratio(), 0.5);
    /// assert_eq!(builder.backward_ratio(), 0.5);
    /// assert_eq!(builder.max_iterations(), 2);
    /// assert_eq!(builder.new_vertices(), 50);
    /// assert!(builder.max_id().is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the forward burning probability `p`.
    #[must_use]
    pub fn with_forward_ratio(mut self, ratio: f64) -> Self {
        self.forward_ratio = ratio;
        self
    }

    /// Returns the configured forward burning probability.
    #[must_use]
    pub fn forward_ratio(&self) -> f64 {
        self.forward_ratio
    }

    /// Overrides the backward burning probability `r`.
    #[must_use]
    pub fn with_backward_ratio(mut self, ratio: f64) -> Self {
        self.backward_ratio = ratio;
        self
    }

    /// Returns the configured backward burning probability.
    #[must_use]
    pub fn backward_ratio(&self) -> f64 {
        self.backward_ratio
    }

    /// Caps the number of rounds each fire may run.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns the configured round budget.
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Sets how many vertices to add.
    #[must_use]
    pub fn with_new_vertices(mut self, count: usize) -> Self {
        self.new_vertices = count;
        self
    }

    /// Returns the configured number of new vertices.
    #[must_use]
    pub fn new_vertices(&self) -> usize {
        self.new_vertices
    }

    /// Sets the largest vertex id already in use. New vertices are numbered
    /// from `max_id + 1`. When unset, the graph's largest id is used.
    #[must_use]
    pub fn with_max_id(mut self, max_id: VertexId) -> Self {
        self.max_id = Some(max_id);
        self
    }

    /// Returns the explicitly configured maximum id, if any.
    #[must_use]
    pub fn max_id(&self) -> Option<VertexId> {
        self.max_id
    }

    /// Records how the input graph was encoded.
    #[must_use]
    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the configured input format.
    #[must_use]
    pub fn format(&self) -> GraphFormat {
        self.format
    }

    /// Sets the execution strategy used for each fire's selection phase.
    ///
    /// # Examples
    /// ```
    /// use kindling_core::{ExecutionStrategy, ForestFireBuilder};
    ///
    /// let builder = ForestFireBuilder::new().with_execution_strategy(ExecutionStrategy::Parallel);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Parallel);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Seeds the run-scoped RNG used by [`ForestFire::evolve`].
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the configured RNG seed.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Validates the configuration and constructs a [`ForestFire`] runner.
    ///
    /// Probabilities outside `(0, 1)` are accepted and degrade as described on
    /// [`crate::geometric_count`]; a warning is logged for each.
    ///
    /// A round budget of zero is valid: each new vertex then links to its
    /// ambassador only.
    ///
    /// # Errors
    /// Returns [`EvolutionError::NanProbability`] when either probability is
    /// NaN.
    ///
    /// # Examples
    /// ```
    /// use kindling_core::{EvolutionError, ForestFireBuilder};
    ///
    /// let err = ForestFireBuilder::new()
    ///     .with_backward_ratio(f64::NAN)
    ///     .build()
    ///     .expect_err("NaN is rejected");
    /// assert_eq!(err, EvolutionError::NanProbability { parameter: "r_ratio" });
    /// ```
    pub fn build(self) -> Result<ForestFire> {
        check_probability("p_ratio", self.forward_ratio)?;
        check_probability("r_ratio", self.backward_ratio)?;

        Ok(ForestFire::new(
            FireParams::new(self.forward_ratio, self.backward_ratio, self.max_iterations),
            self.new_vertices,
            self.max_id,
            self.format,
            self.execution_strategy,
            self.rng_seed,
        ))
    }
}

fn check_probability(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(EvolutionError::NanProbability { parameter });
    }
    if value <= 0.0 || value >= 1.0 {
        warn!(
            parameter,
            value, "burning probability outside (0, 1); this direction recruits nobody"
        );
    }
    Ok(())
}

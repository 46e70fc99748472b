//! Command implementations and argument parsing for the kindling CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use kindling_core::{
    DEFAULT_RNG_SEED, Evolution, EvolutionError, ExecutionStrategy, ForestFireBuilder,
    GraphFormat, VertexId,
};
use kindling_providers_edge_list::{EdgeListError, EdgeListProvider, save_edge_list};
use kindling_verify::{VerificationError, VerificationReport, verify_evolution};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "kindling",
    about = "Grow graphs with the Forest Fire model."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Add new vertices to an edge-list graph.
    Evolve(EvolveCommand),
}

/// Options accepted by the `evolve` command.
#[derive(Debug, Args, Clone)]
pub struct EvolveCommand {
    /// Edge-list file, one `source target` pair per line.
    pub graph: PathBuf,

    /// Largest vertex id in use; new vertices are numbered from `MAX_ID + 1`.
    pub max_id: u64,

    /// Forward burning probability.
    #[arg(allow_negative_numbers = true)]
    pub p_ratio: f64,

    /// Backward burning probability.
    #[arg(allow_negative_numbers = true)]
    pub r_ratio: f64,

    /// Maximum number of rounds each fire may run.
    pub max_iterations: usize,

    /// Number of vertices to add.
    pub new_vertices: usize,

    /// Treat the input as undirected.
    #[arg(long)]
    pub undirected: bool,

    /// Treat the input as vertex-based (unsupported; the run is rejected).
    #[arg(long = "vertex-based")]
    pub vertex_based: bool,

    /// Seed for the run's random source.
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    pub seed: u64,

    /// How each fire's selection phase is executed.
    #[arg(long, value_enum, default_value_t = StrategyArg::Sequential)]
    pub strategy: StrategyArg,

    /// Write the grown graph to this path as an edge list.
    #[arg(long = "save-result")]
    pub save_result: Option<PathBuf>,

    /// Check the grown graph against the input after the run.
    #[arg(long)]
    pub verify: bool,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

impl EvolveCommand {
    fn format(&self) -> GraphFormat {
        GraphFormat::new(!self.undirected, !self.vertex_based)
    }
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Select neighbours on the calling thread.
    Sequential,
    /// Select neighbours across the rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The grown graph could not be written.
    #[error("failed to save result to `{path}`: {source}")]
    Save {
        /// Destination path.
        path: PathBuf,
        /// Underlying writer error.
        #[source]
        source: EdgeListError,
    },
    /// Edge-list ingestion failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// Evolution failed.
    #[error(transparent)]
    Core(#[from] EvolutionError),
    /// The grown graph failed verification.
    #[error(transparent)]
    Verify(#[from] VerificationError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Save { source, .. } | Self::EdgeList(source) => Some(source.code().as_str()),
            Self::Core(error) => Some(error.code().as_str()),
            Self::Verify(error) => Some(error.code().as_str()),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the loaded graph.
    pub data_source: String,
    /// Format flags the graph was evolved under.
    pub format: GraphFormat,
    /// Vertex count before evolution.
    pub vertices_before: usize,
    /// Edge count before evolution.
    pub edges_before: usize,
    /// The evolution run.
    pub evolution: Evolution,
    /// Where the grown graph was saved, if requested.
    pub saved_to: Option<PathBuf>,
    /// Verification totals, if requested.
    pub verification: Option<VerificationReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, evolution, saving, or verification
/// fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use kindling_cli::cli::{Cli, Command, EvolveCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 1\n1 2\n2 3\n")?;
/// let cli = Cli {
///     command: Command::Evolve(EvolveCommand {
///         graph: file.path().to_path_buf(),
///         max_id: 3,
///         p_ratio: 0.5,
///         r_ratio: 0.5,
///         max_iterations: 2,
///         new_vertices: 4,
///         undirected: false,
///         vertex_based: false,
///         seed: 1,
///         strategy: StrategyArg::Sequential,
///         save_result: None,
///         verify: true,
///         name: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.evolution.vertices_added(), 4);
/// assert!(summary.verification.is_some());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Evolve(evolve) => {
            Span::current().record("command", field::display("evolve"));
            run_evolve(evolve)
        }
    }
}

#[instrument(
    name = "cli.evolve",
    err,
    skip(command),
    fields(path = field::Empty, max_id = command.max_id, new_vertices = command.new_vertices),
)]
pub(super) fn run_evolve(command: EvolveCommand) -> Result<ExecutionSummary, CliError> {
    Span::current().record("path", field::display(command.graph.display()));
    let format = command.format();
    // Vertex-based files are not edge lists; reject before reading them.
    if !format.is_edge_based() {
        return Err(EvolutionError::UnsupportedFormat { format }.into());
    }

    let model = ForestFireBuilder::new()
        .with_forward_ratio(command.p_ratio)
        .with_backward_ratio(command.r_ratio)
        .with_max_iterations(command.max_iterations)
        .with_new_vertices(command.new_vertices)
        .with_max_id(VertexId::new(command.max_id))
        .with_format(format)
        .with_execution_strategy(command.strategy.into())
        .with_rng_seed(command.seed)
        .build()?;

    let name = derive_data_source_name(&command.graph, command.name.as_deref());
    let provider = EdgeListProvider::try_from_reader(name, open_graph_reader(&command.graph)?)?;
    let data_source = provider.name().to_owned();
    let original = provider.into_graph();
    let vertices_before = original.vertex_count();
    let edges_before = original.edge_count();

    // Verification needs the untouched input, so only clone when asked to.
    let (evolution, original) = if command.verify {
        (model.evolve(original.clone())?, Some(original))
    } else {
        (model.evolve(original)?, None)
    };

    if let Some(path) = &command.save_result {
        save_edge_list(evolution.graph(), path).map_err(|source| CliError::Save {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "result saved");
    }

    let verification = original
        .map(|original| {
            verify_evolution(
                &original,
                evolution.graph(),
                evolution.first_new_vertex(),
                evolution.vertices_added(),
                command.max_iterations,
            )
        })
        .transpose()?;

    info!(
        data_source = data_source.as_str(),
        vertices = evolution.graph().vertex_count(),
        edges = evolution.graph().edge_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source,
        format,
        vertices_before,
        edges_before,
        evolution,
        saved_to: command.save_result,
        verification,
    })
}

#[instrument(name = "cli.open_graph_reader", err, fields(path = field::Empty))]
pub(super) fn open_graph_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let graph = summary.evolution.graph();
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "format: {}", summary.format)?;
    writeln!(
        writer,
        "vertices: {} -> {}",
        summary.vertices_before,
        graph.vertex_count()
    )?;
    writeln!(
        writer,
        "edges: {} -> {}",
        summary.edges_before,
        graph.edge_count()
    )?;
    writeln!(
        writer,
        "new vertices: {}",
        summary.evolution.vertices_added()
    )?;
    if summary.evolution.vertices_added() > 0 {
        writeln!(
            writer,
            "first new vertex: {}",
            summary.evolution.first_new_vertex()
        )?;
    }
    writeln!(writer, "fire rounds: {}", summary.evolution.total_rounds())?;
    if let Some(path) = &summary.saved_to {
        writeln!(writer, "saved result: {}", path.display())?;
    }
    if let Some(report) = &summary.verification {
        writeln!(
            writer,
            "verification: passed ({} original edges, {} new edges)",
            report.original_edges(),
            report.new_edges()
        )?;
    }
    Ok(())
}

//! Command-line interface orchestration for kindling.
//!
//! The `evolve` command loads an edge-list graph, grows it with the Forest
//! Fire model, and optionally saves and verifies the result.

mod commands;

pub use commands::{
    Cli, CliError, Command, EvolveCommand, ExecutionSummary, StrategyArg, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;

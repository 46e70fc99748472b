//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::{EvolveCommand, StrategyArg, run_evolve};
use super::{CliError, ExecutionSummary};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Builds an `evolve` command with moderate burning and no extras.
pub(super) fn evolve_command(graph: PathBuf, max_id: u64, new_vertices: usize) -> EvolveCommand {
    EvolveCommand {
        graph,
        max_id,
        p_ratio: 0.4,
        r_ratio: 0.3,
        max_iterations: 2,
        new_vertices,
        undirected: false,
        vertex_based: false,
        seed: 7,
        strategy: StrategyArg::Sequential,
        save_result: None,
        verify: false,
        name: None,
    }
}

pub(super) fn run_evolve_expecting_error(command: EvolveCommand, panic_msg: &str) -> CliError {
    match run_evolve(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_evolve_expecting_success(command: EvolveCommand) -> ExecutionSummary {
    match run_evolve(command) {
        Ok(summary) => summary,
        Err(err) => panic!("evolve must succeed: {err}"),
    }
}

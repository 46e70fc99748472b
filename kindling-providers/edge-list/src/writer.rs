//! Edge-list serialisation.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use kindling_core::Graph;

use crate::errors::EdgeListError;

/// Writes one `source target` line per edge in insertion order.
///
/// Vertices without edges are not representable in the format and are
/// omitted.
///
/// # Errors
/// Returns [`EdgeListError::Io`] when writing fails.
///
/// # Examples
/// ```
/// use kindling_core::Graph;
/// use kindling_providers_edge_list::write_edge_list;
///
/// let graph = Graph::from_edges([(0, 1), (2, 0)]);
/// let mut out = Vec::new();
/// write_edge_list(&graph, &mut out).expect("writing to a Vec succeeds");
/// assert_eq!(String::from_utf8(out).expect("utf-8"), "0 1\n2 0\n");
/// ```
pub fn write_edge_list<W: Write>(graph: &Graph, mut writer: W) -> Result<(), EdgeListError> {
    for edge in graph.edges() {
        writeln!(writer, "{} {}", edge.source(), edge.target())?;
    }
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes `graph` into it.
///
/// # Errors
/// Returns [`EdgeListError::Io`] when the file cannot be created or written.
pub fn save_edge_list(graph: &Graph, path: impl AsRef<Path>) -> Result<(), EdgeListError> {
    let file = File::create(path)?;
    write_edge_list(graph, BufWriter::new(file))
}

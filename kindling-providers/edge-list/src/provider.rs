//! Edge-list loading.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use kindling_core::{Graph, VertexId};
use tracing::{debug, instrument};

use crate::errors::EdgeListError;

/// A graph loaded from an edge list, together with the name it was loaded
/// under.
///
/// Each data line holds exactly two unsigned integers separated by
/// whitespace. Blank lines and lines starting with `#` or `%` are skipped.
/// Edges keep their file order and duplicates are kept.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use kindling_core::VertexId;
/// use kindling_providers_edge_list::EdgeListProvider;
///
/// let input = "# tiny\n0 1\n1\t2\n\n2 0\n";
/// let provider = EdgeListProvider::try_from_reader("tiny", Cursor::new(input))
///     .expect("edge list must parse");
/// assert_eq!(provider.name(), "tiny");
/// assert_eq!(provider.graph().edge_count(), 3);
/// assert_eq!(provider.max_vertex_id(), Some(VertexId::new(2)));
/// ```
#[derive(Debug, Clone)]
pub struct EdgeListProvider {
    name: String,
    graph: Graph,
}

impl EdgeListProvider {
    /// Returns the name the graph was loaded under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loaded graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the provider and returns the loaded graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Returns the largest vertex id in the loaded graph.
    #[must_use]
    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.graph.max_vertex_id()
    }

    /// Loads an edge list from the file at `path`.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when the file cannot be opened or read,
    /// plus every error [`Self::try_from_reader`] can return.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, EdgeListError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Loads an edge list from a buffered reader.
    ///
    /// # Errors
    /// Returns [`EdgeListError::MissingEndpoint`],
    /// [`EdgeListError::TrailingToken`], or [`EdgeListError::InvalidVertexId`]
    /// for a malformed line, [`EdgeListError::EmptyInput`] when no edge was
    /// found, and [`EdgeListError::Io`] when reading fails.
    #[instrument(name = "edge_list.load", err, skip_all, fields(name = tracing::field::Empty))]
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, EdgeListError> {
        let name = name.into();
        tracing::Span::current().record("name", name.as_str());
        let mut graph = Graph::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some((source, target)) = parse_line(index + 1, &line)? {
                graph.add_edge(source, target);
            }
        }
        if graph.edge_count() == 0 {
            return Err(EdgeListError::EmptyInput);
        }
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "edge list loaded"
        );
        Ok(Self { name, graph })
    }
}

/// Parses one line; `Ok(None)` marks a blank or comment line.
fn parse_line(line: usize, text: &str) -> Result<Option<(VertexId, VertexId)>, EdgeListError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
        return Ok(None);
    }
    let mut tokens = trimmed.split_whitespace();
    let (Some(source), Some(target)) = (tokens.next(), tokens.next()) else {
        return Err(EdgeListError::MissingEndpoint { line, found: 1 });
    };
    if let Some(extra) = tokens.next() {
        return Err(EdgeListError::TrailingToken {
            line,
            token: extra.to_owned(),
        });
    }
    Ok(Some((parse_vertex(line, source)?, parse_vertex(line, target)?)))
}

fn parse_vertex(line: usize, token: &str) -> Result<VertexId, EdgeListError> {
    token
        .parse::<u64>()
        .map(VertexId::new)
        .map_err(|source| EdgeListError::InvalidVertexId {
            line,
            token: token.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::blank("   ")]
    #[case::hash_comment("# source target")]
    #[case::percent_comment("% matrix market header")]
    #[case::indented_comment("  # note")]
    fn skipped_lines(#[case] text: &str) {
        assert!(matches!(parse_line(1, text), Ok(None)));
    }

    #[rstest]
    #[case::spaces("3 4", 3, 4)]
    #[case::tabs("3\t\t4", 3, 4)]
    #[case::padded("  10   20  \r", 10, 20)]
    #[case::self_loop("7 7", 7, 7)]
    fn data_lines(#[case] text: &str, #[case] source: u64, #[case] target: u64) {
        let parsed = parse_line(1, text).expect("line must parse");
        assert_eq!(parsed, Some((VertexId::new(source), VertexId::new(target))));
    }

    #[rstest]
    fn lone_endpoint_is_rejected() {
        let err = parse_line(5, "42").expect_err("one endpoint is not an edge");
        assert!(matches!(
            err,
            EdgeListError::MissingEndpoint { line: 5, found: 1 }
        ));
    }

    #[rstest]
    #[case::negative("-1 2", "-1")]
    #[case::fractional("1 2.5", "2.5")]
    #[case::overflow("18446744073709551616 0", "18446744073709551616")]
    fn invalid_ids_name_the_token(#[case] text: &str, #[case] expected: &str) {
        let err = parse_line(2, text).expect_err("token must be rejected");
        match err {
            EdgeListError::InvalidVertexId { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, expected);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}

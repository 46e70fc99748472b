//! Input graph format flags.

use std::fmt;

/// Describes how the input graph was encoded.
///
/// Only edge-based inputs can be evolved; vertex-based inputs are rejected
/// before the graph is touched.
///
/// # Examples
/// ```
/// use kindling_core::GraphFormat;
///
/// let format = GraphFormat::new(true, true);
/// assert!(format.is_directed());
/// assert_eq!(format.to_string(), "(directed,edge-based)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphFormat {
    directed: bool,
    edge_based: bool,
}

impl GraphFormat {
    /// Creates a format description.
    #[must_use]
    pub const fn new(directed: bool, edge_based: bool) -> Self {
        Self {
            directed,
            edge_based,
        }
    }

    /// Returns whether the graph is directed.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_directed(&self) -> bool { self.directed }

    /// Returns whether the graph is stored as an edge list.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_edge_based(&self) -> bool { self.edge_based }
}

impl Default for GraphFormat {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directed = if self.directed {
            "directed"
        } else {
            "undirected"
        };
        let encoding = if self.edge_based {
            "edge-based"
        } else {
            "vertex-based"
        };
        write!(f, "({directed},{encoding})")
    }
}

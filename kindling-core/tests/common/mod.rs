use kindling_core::{Evolution, Graph};

/// Asserts that `base` survives unchanged at the front of the grown graph.
pub fn assert_base_preserved(base: &Graph, evolution: &Evolution) {
    let grown = evolution.graph();
    assert_eq!(
        &grown.vertices()[..base.vertex_count()],
        base.vertices(),
        "base vertices must keep their order"
    );
    assert_eq!(
        &grown.edges()[..base.edge_count()],
        base.edges(),
        "base edges must form a prefix of the grown edge list"
    );
    assert_eq!(grown.edge_count(), base.edge_count() + evolution.edges_added());
}

//! Integration tests covering edge-list loading and saving.
use std::io::{self, Cursor, Write};

use kindling_core::{Graph, VertexId};
use kindling_providers_edge_list::{
    EdgeListError, EdgeListProvider, save_edge_list, write_edge_list,
};
use rstest::rstest;
use tempfile::NamedTempFile;

#[rstest]
fn try_from_reader_keeps_file_order_and_duplicates() {
    let input = "5 1\n1 2\n5 1\n";
    let provider =
        EdgeListProvider::try_from_reader("dupes", Cursor::new(input)).expect("input must parse");
    let graph = provider.graph();
    let edges: Vec<(u64, u64)> = graph
        .edges()
        .iter()
        .map(|edge| (edge.source().get(), edge.target().get()))
        .collect();
    assert_eq!(edges, [(5, 1), (1, 2), (5, 1)]);
    assert_eq!(
        graph.vertices(),
        &[VertexId::new(5), VertexId::new(1), VertexId::new(2)]
    );
}

#[rstest]
#[case::nothing("")]
#[case::only_comments("# header\n% another\n\n")]
fn try_from_reader_rejects_inputs_without_edges(#[case] input: &str) {
    let err = EdgeListProvider::try_from_reader("empty", Cursor::new(input))
        .expect_err("edgeless input must fail");
    assert!(matches!(err, EdgeListError::EmptyInput));
    assert_eq!(err.code().as_str(), "EDGE_LIST_EMPTY_INPUT");
}

#[rstest]
fn errors_report_one_based_line_numbers() {
    let input = "# comment\n0 1\n\n1 2 3\n";
    let err = EdgeListProvider::try_from_reader("bad", Cursor::new(input))
        .expect_err("trailing token must fail");
    match err {
        EdgeListError::TrailingToken { line, token } => {
            assert_eq!(line, 4);
            assert_eq!(token, "3");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn try_from_reader_propagates_io_error() {
    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("boom"))
        }
    }

    impl io::BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::other("boom"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    let err = EdgeListProvider::try_from_reader("failing", FailingReader)
        .expect_err("reader failure must surface");
    assert!(matches!(err, EdgeListError::Io(_)));
}

#[rstest]
fn try_from_path_reports_missing_files() {
    let dir = tempfile::tempdir().expect("temp dir must be created");
    let err = EdgeListProvider::try_from_path("missing", dir.path().join("absent.txt"))
        .expect_err("missing file must fail");
    assert!(matches!(err, EdgeListError::Io(ref source) if source.kind() == io::ErrorKind::NotFound));
}

#[rstest]
fn saved_graphs_load_back_identically() {
    let graph = Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 1), (0, 1)]);
    let file = NamedTempFile::new().expect("temp file must be created");
    save_edge_list(&graph, file.path()).expect("graph must save");

    let loaded = EdgeListProvider::try_from_path("saved", file.path()).expect("file must load");
    assert_eq!(loaded.into_graph(), graph);
}

#[rstest]
fn try_from_path_reads_hand_written_files() {
    let mut file = NamedTempFile::new().expect("temp file must be created");
    writeln!(file, "% generated").expect("write must succeed");
    writeln!(file, "10 20").expect("write must succeed");
    writeln!(file, "20\t30").expect("write must succeed");
    file.flush().expect("flush must succeed");

    let provider = EdgeListProvider::try_from_path("hand", file.path()).expect("file must load");
    assert_eq!(provider.max_vertex_id(), Some(VertexId::new(30)));
    assert_eq!(provider.graph().edge_count(), 2);
}

#[rstest]
fn writer_emits_edges_in_insertion_order() {
    let mut graph = Graph::from_edges([(9, 3)]);
    graph.add_edge(VertexId::new(10), VertexId::new(9));
    graph.add_edge(VertexId::new(10), VertexId::new(3));
    let mut out = Vec::new();
    write_edge_list(&graph, &mut out).expect("writing to memory succeeds");
    assert_eq!(
        String::from_utf8(out).expect("output is utf-8"),
        "9 3\n10 9\n10 3\n"
    );
}

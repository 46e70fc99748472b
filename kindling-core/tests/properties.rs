//! Property suites for evolution invariants over random graphs and parameters.

mod common;

use common::assert_base_preserved;
use kindling_core::{Evolution, ExecutionStrategy, ForestFireBuilder, Graph, VertexId};
use kindling_test_support::{graphs, profile::proptest_cases};
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

/// One randomly drawn evolution run.
#[derive(Debug, Clone)]
struct EvolutionFixture {
    base: Graph,
    max_id_slack: u64,
    forward_ratio: f64,
    backward_ratio: f64,
    max_iterations: usize,
    new_vertices: usize,
    strategy: ExecutionStrategy,
    seed: u64,
}

impl EvolutionFixture {
    fn max_id(&self) -> VertexId {
        let existing = self.base.max_vertex_id().map_or(0, VertexId::get);
        VertexId::new(existing + self.max_id_slack)
    }

    fn run(&self) -> Evolution {
        ForestFireBuilder::new()
            .with_max_id(self.max_id())
            .with_forward_ratio(self.forward_ratio)
            .with_backward_ratio(self.backward_ratio)
            .with_max_iterations(self.max_iterations)
            .with_new_vertices(self.new_vertices)
            .with_execution_strategy(self.strategy)
            .with_rng_seed(self.seed)
            .build()
            .expect("fixture parameters are valid")
            .evolve(self.base.clone())
            .expect("fixture graphs are non-empty")
    }
}

fn strategy_strategy() -> impl Strategy<Value = ExecutionStrategy> {
    prop_oneof![
        Just(ExecutionStrategy::Sequential),
        Just(ExecutionStrategy::Parallel),
    ]
}

fn evolution_fixture_strategy() -> impl Strategy<Value = EvolutionFixture> {
    (
        (1_u64..24, 0_usize..60, any::<u64>()),
        0_u64..5,
        0.0_f64..1.0,
        0.0_f64..1.0,
        0_usize..5,
        0_usize..20,
        strategy_strategy(),
        any::<u64>(),
    )
        .prop_map(
            |(
                (vertices, edges, graph_seed),
                max_id_slack,
                forward_ratio,
                backward_ratio,
                max_iterations,
                new_vertices,
                strategy,
                seed,
            )| EvolutionFixture {
                base: graphs::random(vertices, edges, graph_seed),
                max_id_slack,
                forward_ratio,
                backward_ratio,
                max_iterations,
                new_vertices,
                strategy,
                seed,
            },
        )
}

fn run_id_monotonicity_property(fixture: &EvolutionFixture) -> TestCaseResult {
    let evolution = fixture.run();
    let first = fixture.max_id().get() + 1;
    prop_assert_eq!(evolution.first_new_vertex().get(), first);
    prop_assert_eq!(evolution.vertices_added(), fixture.new_vertices);
    for (offset, record) in (0_u64..).zip(evolution.records()) {
        prop_assert_eq!(record.vertex().get(), first + offset);
        prop_assert!(!fixture.base.contains_vertex(record.vertex()));
        prop_assert!(evolution.graph().contains_vertex(record.vertex()));
    }
    Ok(())
}

fn run_base_invariance_property(fixture: &EvolutionFixture) -> TestCaseResult {
    let evolution = fixture.run();
    assert_base_preserved(&fixture.base, &evolution);
    let first = evolution.first_new_vertex();
    for edge in &evolution.graph().edges()[fixture.base.edge_count()..] {
        prop_assert!(edge.source() >= first, "appended edge {edge:?} leaves a base vertex");
    }
    Ok(())
}

fn run_new_vertex_edge_property(fixture: &EvolutionFixture) -> TestCaseResult {
    let evolution = fixture.run();
    let graph = evolution.graph();
    for record in evolution.records() {
        let vertex = record.vertex();
        let targets = graph.out_neighbours(vertex);

        // Every new vertex is connected, and its first edge goes to the ambassador.
        prop_assert!(!targets.is_empty());
        prop_assert_eq!(targets.len(), record.out_degree());
        prop_assert_eq!(targets.first(), Some(&record.ambassador()));

        // No self-edge, and every target predates the vertex.
        prop_assert!(targets.iter().all(|&target| target < vertex));

        // Recruits are never burnt twice within one fire.
        let mut recruits = targets.get(1..).unwrap_or_default().to_vec();
        recruits.sort_unstable();
        recruits.dedup();
        prop_assert_eq!(recruits.len(), record.edges_added());
    }
    Ok(())
}

fn run_termination_property(fixture: &EvolutionFixture) -> TestCaseResult {
    let evolution = fixture.run();
    for record in evolution.records() {
        prop_assert!(record.rounds() <= fixture.max_iterations);
        if fixture.max_iterations == 0 {
            prop_assert_eq!(record.rounds(), 0);
            prop_assert_eq!(record.out_degree(), 1);
        } else {
            prop_assert!(record.rounds() >= 1);
        }
    }
    prop_assert!(evolution.total_rounds() <= fixture.max_iterations * fixture.new_vertices);
    Ok(())
}

fn run_determinism_property(fixture: &EvolutionFixture) -> TestCaseResult {
    prop_assert_eq!(fixture.run(), fixture.run());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_cases(64)))]

    #[test]
    fn new_ids_follow_max_id_in_creation_order(fixture in evolution_fixture_strategy()) {
        run_id_monotonicity_property(&fixture)?;
    }

    #[test]
    fn base_graph_is_never_modified(fixture in evolution_fixture_strategy()) {
        run_base_invariance_property(&fixture)?;
    }

    #[test]
    fn new_vertices_link_only_to_older_vertices(fixture in evolution_fixture_strategy()) {
        run_new_vertex_edge_property(&fixture)?;
    }

    #[test]
    fn fires_respect_the_round_budget(fixture in evolution_fixture_strategy()) {
        run_termination_property(&fixture)?;
    }

    #[test]
    fn fixed_seed_reproduces_the_graph(fixture in evolution_fixture_strategy()) {
        run_determinism_property(&fixture)?;
    }
}

//! Integration tests for the compound graph transformer.
//!
//! These verify the pipeline through the public API:
//! - the no-container-edges invariant under every state combination
//! - edge aggregation weights against constituent counts
//! - the containment (nesting parent) rules

use depdrift::{DependencyEdge, InclusionState, build_tree, set_state, to_compound_graph};
use rstest::rstest;

fn edge(source: &str, target: &str) -> DependencyEdge {
    DependencyEdge::new(source, target, "import")
}

/// Dependency fixture spanning three folder levels:
///
/// ```text
/// app/x.txt -> app/b/y.txt
/// app/b/y.txt -> app/b/c/z.txt
/// app/b/c/z.txt -> app/x.txt
/// ```
fn cyclic_edges() -> Vec<DependencyEdge> {
    vec![
        edge("app/x.txt", "app/b/y.txt"),
        edge("app/b/y.txt", "app/b/c/z.txt"),
        edge("app/b/c/z.txt", "app/x.txt"),
    ]
}

const ALL_STATES: [InclusionState; 3] = [
    InclusionState::Expanded,
    InclusionState::Collapsed,
    InclusionState::Excluded,
];

// ============================================================================
// No-container-edges invariant
// ============================================================================

#[test]
fn no_edge_touches_a_container_under_any_state_combination() {
    let edges = cyclic_edges();
    let base = build_tree(&edges);

    // Drive both folders and one file through every state combination; each
    // edit sequence exercises a distinct reachable tree state.
    for b_state in ALL_STATES {
        for c_state in ALL_STATES {
            for x_state in [InclusionState::Expanded, InclusionState::Excluded] {
                let tree = set_state(&base, "app/b", b_state);
                let tree = set_state(&tree, "app/b/c", c_state);
                let tree = set_state(&tree, "app/x.txt", x_state);

                let graph = to_compound_graph(&edges, &tree);
                for e in &graph.edges {
                    let source = graph.node(&e.source).expect("edge source must be a node");
                    let target = graph.node(&e.target).expect("edge target must be a node");
                    assert!(
                        source.is_leaf && target.is_leaf,
                        "edge {} touches a container under ({b_state:?}, {c_state:?}, {x_state:?})",
                        e.id
                    );
                }
            }
        }
    }
}

#[test]
fn two_edit_sweep_over_every_node_and_state_upholds_all_invariants() {
    let edges = cyclic_edges();
    let base = build_tree(&edges);
    let ids: Vec<String> = base.nodes.keys().cloned().collect();

    for first_id in &ids {
        for first_state in ALL_STATES {
            for second_id in &ids {
                for second_state in ALL_STATES {
                    let tree = set_state(&base, first_id, first_state);
                    let tree = set_state(&tree, second_id, second_state);

                    // Upward invariant: a parent with any visible child is
                    // expanded; one with none is excluded or collapsed.
                    for node in tree.nodes.values() {
                        if node.children.is_empty() {
                            continue;
                        }
                        let any_visible = node.children.iter().any(|c| {
                            tree.get(c).is_some_and(|child| child.state.is_visible())
                        });
                        if any_visible {
                            assert_eq!(node.state, InclusionState::Expanded, "node {}", node.id);
                        } else {
                            assert_ne!(node.state, InclusionState::Expanded, "node {}", node.id);
                        }
                    }

                    let graph = to_compound_graph(&edges, &tree);
                    let mut constituents = 0;
                    for e in &graph.edges {
                        let source = graph.node(&e.source).expect("rendered source");
                        let target = graph.node(&e.target).expect("rendered target");
                        assert!(
                            source.is_leaf && target.is_leaf,
                            "edge {} touches a container after editing \
                             {first_id}={first_state:?}, {second_id}={second_state:?}",
                            e.id
                        );
                        assert_eq!(e.weight as usize, e.original_edges.len(), "edge {}", e.id);
                        constituents += e.original_edges.len();
                    }
                    assert!(constituents <= edges.len());
                }
            }
        }
    }
}

#[test]
fn every_edge_endpoint_is_a_rendered_node() {
    let edges = cyclic_edges();
    let base = build_tree(&edges);

    for b_state in ALL_STATES {
        let tree = set_state(&base, "app/b", b_state);
        let graph = to_compound_graph(&edges, &tree);
        for e in &graph.edges {
            assert!(graph.node(&e.source).is_some(), "dangling source in {}", e.id);
            assert!(graph.node(&e.target).is_some(), "dangling target in {}", e.id);
        }
    }
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn aggregated_weight_equals_constituent_count_for_unit_weights() {
    // Five unit-weight edges from three files into a collapsed folder.
    let edges = vec![
        edge("app/x.txt", "app/b/y.txt"),
        edge("app/x.txt", "app/b/z.txt"),
        edge("app/w.txt", "app/b/y.txt"),
        edge("app/w.txt", "app/b/q.txt"),
        edge("app/v.txt", "app/b/y.txt"),
    ];
    let tree = build_tree(&edges);
    let graph = to_compound_graph(&edges, &tree);

    let total_weight: u32 = graph.edges.iter().map(|e| e.weight).sum();
    let total_constituents: usize = graph.edges.iter().map(|e| e.original_edges.len()).sum();
    assert_eq!(total_weight as usize, total_constituents);
    assert_eq!(total_constituents, edges.len());

    for e in &graph.edges {
        assert_eq!(
            e.weight as usize,
            e.original_edges.len(),
            "weight of {} must equal its constituent count",
            e.id
        );
    }
}

#[rstest]
#[case::bundled("app/b", 3)] // one source into one collapsed folder target
#[case::split("app/b/y.txt", 1)] // expanding b splits the bundle
fn collapse_level_controls_aggregation(#[case] expected_target: &str, #[case] expected_weight: u32) {
    let edges = vec![
        edge("app/x.txt", "app/b/y.txt"),
        edge("app/x.txt", "app/b/z.txt"),
        edge("app/x.txt", "app/b/q.txt"),
    ];
    let tree = build_tree(&edges);
    let tree = if expected_target == "app/b" {
        tree // initial state: app/b already collapsed
    } else {
        set_state(&tree, "app/b", InclusionState::Expanded)
    };

    let graph = to_compound_graph(&edges, &tree);
    let first = graph
        .edges
        .iter()
        .find(|e| e.target == expected_target)
        .expect("expected aggregated edge");
    assert_eq!(first.source, "app/x.txt");
    assert_eq!(first.weight, expected_weight);
}

// ============================================================================
// Scenario tests
// ============================================================================

#[test]
fn collapsed_folder_scenario_yields_single_aggregated_edge() {
    // edges [a/x.txt -> a/b/y.txt], root `a`, `a` expanded, `a/b` collapsed.
    let edges = vec![edge("a/x.txt", "a/b/y.txt")];
    let tree = build_tree(&edges);
    assert_eq!(tree.root_id, "a");

    let tree = set_state(&tree, "a", InclusionState::Expanded);
    let tree = set_state(&tree, "a/b", InclusionState::Collapsed);
    let graph = to_compound_graph(&edges, &tree);

    let x = graph.node("a/x.txt").expect("file leaf");
    let b = graph.node("a/b").expect("collapsed folder leaf");
    assert!(x.is_leaf);
    assert!(b.is_leaf);

    assert_eq!(graph.edges.len(), 1);
    let e = &graph.edges[0];
    assert_eq!((e.source.as_str(), e.target.as_str()), ("a/x.txt", "a/b"));
    assert_eq!(e.weight, 1);
}

#[test]
fn excluded_folder_scenario_yields_no_edges() {
    let edges = vec![edge("a/x.txt", "a/b/y.txt")];
    let tree = build_tree(&edges);
    let tree = set_state(&tree, "a", InclusionState::Expanded);
    let tree = set_state(&tree, "a/b", InclusionState::Excluded);

    let graph = to_compound_graph(&edges, &tree);
    assert!(graph.edges.is_empty(), "target endpoint must be unresolved");
    assert!(graph.node("a/x.txt").is_some(), "source file remains visible");
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn container_parent_is_only_set_for_rendered_containers() {
    let edges = cyclic_edges();
    let base = build_tree(&edges);

    for b_state in ALL_STATES {
        let tree = set_state(&base, "app/b", b_state);
        let graph = to_compound_graph(&edges, &tree);

        for node in &graph.nodes {
            if let Some(parent) = &node.container_parent {
                let parent_node = graph
                    .node(parent)
                    .expect("nesting parent must itself be rendered");
                assert!(
                    !parent_node.is_leaf,
                    "nesting parent {parent} of {} must be a container",
                    node.id
                );
            }
        }
    }
}

#[test]
fn tree_shape_is_stable_across_state_edits() {
    let edges = cyclic_edges();
    let tree = build_tree(&edges);
    let edited = set_state(&tree, "app/b", InclusionState::Expanded);

    assert_eq!(tree.len(), edited.len());
    for (id, node) in &tree.nodes {
        let after = edited.get(id).expect("node set must not change");
        assert_eq!(node.parent, after.parent);
        assert_eq!(node.children, after.children);
        assert_eq!(node.kind, after.kind);
    }
}

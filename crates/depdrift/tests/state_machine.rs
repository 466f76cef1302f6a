//! Integration tests for the inclusion state machine.
//!
//! Exercises downward and upward propagation through the public API on a
//! multi-level tree, including the edit paths a client UI would produce.

use depdrift::InclusionState::{Collapsed, Excluded, Expanded};
use depdrift::{DependencyEdge, InclusionState, ProjectTree, build_tree, set_state};
use rstest::rstest;

/// Tree fixture:
///
/// ```text
/// app
/// ├── x.txt
/// └── b
///     ├── y.txt
///     └── c
///         └── z.txt
/// ```
fn fixture_tree() -> ProjectTree {
    let edges = vec![
        DependencyEdge::new("app/x.txt", "app/b/y.txt", "import"),
        DependencyEdge::new("app/b/y.txt", "app/b/c/z.txt", "import"),
    ];
    build_tree(&edges)
}

fn state_of(tree: &ProjectTree, id: &str) -> InclusionState {
    tree.get(id).unwrap_or_else(|| panic!("missing node {id}")).state
}

// ============================================================================
// Downward propagation
// ============================================================================

#[test]
fn expanding_a_folder_reveals_files_and_collapses_subfolders() {
    let tree = fixture_tree();
    let tree = set_state(&tree, "app/b", Expanded);

    assert_eq!(state_of(&tree, "app/b"), Expanded);
    assert_eq!(state_of(&tree, "app/b/y.txt"), Expanded);
    assert_eq!(state_of(&tree, "app/b/c"), Collapsed);
    // grandchildren beneath the collapsed subfolder stay hidden
    assert_eq!(state_of(&tree, "app/b/c/z.txt"), Excluded);
}

#[rstest]
#[case::collapse(Collapsed)]
#[case::exclude(Excluded)]
fn hiding_a_folder_excludes_its_entire_subtree(#[case] edit: InclusionState) {
    let tree = fixture_tree();
    let tree = set_state(&tree, "app/b", Expanded);
    let tree = set_state(&tree, "app/b/c", Expanded);

    let tree = set_state(&tree, "app/b", edit);

    assert_eq!(state_of(&tree, "app/b"), edit);
    for id in ["app/b/y.txt", "app/b/c", "app/b/c/z.txt"] {
        assert_eq!(state_of(&tree, id), Excluded, "descendant {id}");
    }
}

#[test]
fn collapse_on_a_file_is_coerced_to_excluded() {
    let tree = fixture_tree();
    let tree = set_state(&tree, "app/x.txt", Collapsed);
    assert_eq!(state_of(&tree, "app/x.txt"), Excluded);
}

// ============================================================================
// Upward propagation
// ============================================================================

#[test]
fn excluding_every_child_excludes_the_expanded_parent() {
    let tree = fixture_tree();
    let tree = set_state(&tree, "app/b", Expanded);

    let tree = set_state(&tree, "app/b/y.txt", Excluded);
    let tree = set_state(&tree, "app/b/c", Excluded);

    assert_eq!(state_of(&tree, "app/b"), Excluded);
}

#[test]
fn reincluding_a_child_resurrects_the_ancestor_chain() {
    let tree = fixture_tree();
    let tree = set_state(&tree, "app/b", Expanded);
    let tree = set_state(&tree, "app/b/y.txt", Excluded);
    let tree = set_state(&tree, "app/b/c", Excluded);
    assert_eq!(state_of(&tree, "app/b"), Excluded);

    let tree = set_state(&tree, "app/b/y.txt", Expanded);

    assert_eq!(state_of(&tree, "app/b"), Expanded);
    assert_eq!(state_of(&tree, "app"), Expanded);
}

#[test]
fn upward_pass_never_produces_collapsed() {
    // Collapsed is a direct edit only. Whatever children do, derived parent
    // states are limited to Expanded and Excluded.
    let tree = fixture_tree();
    let tree = set_state(&tree, "app/b", Expanded);
    let tree = set_state(&tree, "app/b/c", Expanded);
    let before: Vec<(String, InclusionState)> = tree
        .nodes
        .iter()
        .map(|(id, n)| (id.clone(), n.state))
        .collect();

    let edited = set_state(&tree, "app/b/c/z.txt", Excluded);

    for (id, prior) in before {
        let now = state_of(&edited, &id);
        if now != prior && id != "app/b/c/z.txt" {
            assert_ne!(now, Collapsed, "derived state of {id} must not be Collapsed");
        }
    }
}

// ============================================================================
// Edit semantics
// ============================================================================

#[test]
fn unknown_id_returns_the_tree_unchanged() {
    let tree = fixture_tree();
    let edited = set_state(&tree, "app/missing.txt", Excluded);

    assert_eq!(tree.len(), edited.len());
    for (id, node) in &tree.nodes {
        assert_eq!(node.state, state_of(&edited, id));
    }
}

#[test]
fn set_state_does_not_mutate_its_input() {
    let tree = fixture_tree();
    let snapshot: Vec<(String, InclusionState)> = tree
        .nodes
        .iter()
        .map(|(id, n)| (id.clone(), n.state))
        .collect();

    let _ = set_state(&tree, "app/b", Expanded);
    let _ = set_state(&tree, "app", Excluded);

    for (id, prior) in snapshot {
        assert_eq!(state_of(&tree, &id), prior, "input tree changed at {id}");
    }
}

#[test]
fn initial_states_show_one_level_of_detail() {
    let tree = fixture_tree();

    assert_eq!(state_of(&tree, "app"), Expanded);
    assert_eq!(state_of(&tree, "app/x.txt"), Expanded);
    assert_eq!(state_of(&tree, "app/b"), Collapsed);
    assert_eq!(state_of(&tree, "app/b/y.txt"), Excluded);
    assert_eq!(state_of(&tree, "app/b/c"), Excluded);
}

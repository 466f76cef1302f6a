//! The inclusion state machine.
//!
//! One public operation: [`set_state`], a pure function from a tree snapshot
//! to a new tree snapshot. The propagation rules are asymmetric:
//!
//! - **Downward** from the edited node: expanding a node collapses its folder
//!   children and expands its file children; collapsing or excluding a node
//!   forces the entire subtree excluded.
//! - **Upward** to the root: every ancestor is recomputed from its children's
//!   current states, excluded iff all children are excluded, else expanded.
//!   `Collapsed` is never inferred upward; it is volitional, set only by a
//!   direct edit on the node itself.
//!
//! This module knows nothing about graph rendering; it reasons only about
//! the tree.

use tracing::{debug, trace};

use crate::tree::ProjectTree;
use crate::types::{InclusionState, NodeKind};

/// Apply a user edit to one node and return the propagated tree snapshot.
///
/// The input tree is never mutated. An unknown node id (a stale id from a
/// previous snapshot racing ahead of a snapshot swap) returns the input
/// unchanged rather than failing.
#[must_use]
pub fn set_state(tree: &ProjectTree, node_id: &str, new_state: InclusionState) -> ProjectTree {
    let mut next = tree.clone();

    let Some(node) = next.nodes.get_mut(node_id) else {
        debug!(node_id, "set_state on unknown node id, returning tree unchanged");
        return next;
    };

    // Files have no collapsed state; a collapse request on a file hides it.
    let applied = match (node.kind, new_state) {
        (NodeKind::File, InclusionState::Collapsed) => InclusionState::Excluded,
        _ => new_state,
    };
    node.state = applied;
    trace!(node_id, state = applied.as_str(), "state edit");

    propagate_down(&mut next, node_id, applied);
    propagate_up(&mut next, node_id);

    next
}

/// Apply the downward rules to the edited node's subtree.
fn propagate_down(tree: &mut ProjectTree, node_id: &str, state: InclusionState) {
    let children = match tree.nodes.get(node_id) {
        Some(node) => node.children.clone(),
        None => return,
    };

    match state {
        InclusionState::Expanded => {
            for child_id in children {
                let Some(child) = tree.nodes.get_mut(&child_id) else {
                    continue;
                };
                match child.kind {
                    NodeKind::Folder => {
                        // Folder children become opaque representatives; the
                        // recursion stops at them apart from hiding their
                        // own subtrees.
                        child.state = InclusionState::Collapsed;
                        force_excluded_below(tree, &child_id);
                    }
                    NodeKind::File => {
                        child.state = InclusionState::Expanded;
                    }
                }
            }
        }
        InclusionState::Collapsed | InclusionState::Excluded => {
            force_excluded_below(tree, node_id);
        }
    }
}

/// Force every descendant of a node, at every depth, to `Excluded`.
fn force_excluded_below(tree: &mut ProjectTree, node_id: &str) {
    let children = match tree.nodes.get(node_id) {
        Some(node) => node.children.clone(),
        None => return,
    };
    for child_id in children {
        if let Some(child) = tree.nodes.get_mut(&child_id) {
            child.state = InclusionState::Excluded;
        }
        force_excluded_below(tree, &child_id);
    }
}

/// Recompute each ancestor of the edited node from its children's current
/// states: excluded iff all children are excluded, else expanded.
///
/// This may upgrade an ancestor from `Excluded` or `Collapsed` to `Expanded`
/// but never downgrades one to `Collapsed`.
fn propagate_up(tree: &mut ProjectTree, node_id: &str) {
    let mut current = tree.nodes.get(node_id).and_then(|n| n.parent.clone());

    while let Some(ancestor_id) = current {
        let all_excluded = tree
            .nodes
            .get(&ancestor_id)
            .is_some_and(|ancestor| {
                ancestor.children.iter().all(|child_id| {
                    tree.nodes
                        .get(child_id)
                        .is_none_or(|child| child.state == InclusionState::Excluded)
                })
            });

        let Some(ancestor) = tree.nodes.get_mut(&ancestor_id) else {
            break;
        };
        ancestor.state = if all_excluded {
            InclusionState::Excluded
        } else {
            InclusionState::Expanded
        };

        current = ancestor.parent.clone();
    }
}

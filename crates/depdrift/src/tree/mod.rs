//! The rooted project tree and its builder.
//!
//! The tree is rebuilt from scratch whenever the active commit snapshot
//! changes; within one snapshot's lifetime its shape (node set, parent and
//! child links) never changes. Only inclusion states mutate, and those go
//! through [`set_state`](crate::tree::state::set_state).

mod state;

pub use state::set_state;

use std::collections::HashMap;

use tracing::debug;

use crate::paths::{HeuristicRoot, RootStrategy, collect_paths};
use crate::types::{DependencyEdge, InclusionState, NodeKind, TreeNode};

/// A rooted tree of folder and file nodes keyed by normalized path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectTree {
    /// All nodes, keyed by id.
    pub nodes: HashMap<String, TreeNode>,
    /// Id of the single node with no parent.
    pub root_id: String,
}

impl ProjectTree {
    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Whether a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes at all. A built tree always has at
    /// least the root, so this is only true for `ProjectTree::default()`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve a normalized path to the id of its tree node.
    ///
    /// Paths under a synthesized root (`app`, `project`) do not carry the
    /// root segment themselves, so the root-prefixed form is tried second.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Option<&str> {
        if let Some((id, _)) = self.nodes.get_key_value(path) {
            return Some(id);
        }
        let prefixed = format!("{}/{}", self.root_id, path);
        self.nodes.get_key_value(prefixed.as_str()).map(|(id, _)| id.as_str())
    }

    /// Depth of a node below the root (root itself is depth 0).
    ///
    /// Node ids are slash-delimited paths with a single-segment root, so
    /// depth is the separator count.
    #[must_use]
    pub fn depth(&self, id: &str) -> usize {
        id.matches('/').count()
    }
}

/// Build the project tree for an edge list using the default root heuristic.
#[must_use]
pub fn build_tree(edges: &[DependencyEdge]) -> ProjectTree {
    build_tree_with(edges, &HeuristicRoot)
}

/// Build the project tree for an edge list with a caller-chosen root strategy.
///
/// The root node is always materialized, even for zero edges. Re-processing
/// the same path or overlapping prefixes is idempotent.
#[must_use]
pub fn build_tree_with(edges: &[DependencyEdge], strategy: &dyn RootStrategy) -> ProjectTree {
    let paths = collect_paths(edges);
    let root_label = strategy.infer_root(&paths);

    let mut nodes = HashMap::new();
    nodes.insert(
        root_label.clone(),
        TreeNode {
            id: root_label.clone(),
            label: root_label.clone(),
            kind: NodeKind::Folder,
            parent: None,
            children: Vec::new(),
            state: InclusionState::Expanded,
        },
    );

    for path in &paths {
        insert_path(&mut nodes, &root_label, path);
    }

    sort_children(&mut nodes);
    assign_initial_states(&mut nodes, &root_label);

    debug!(
        root = %root_label,
        nodes = nodes.len(),
        paths = paths.len(),
        "built project tree"
    );

    ProjectTree {
        nodes,
        root_id: root_label,
    }
}

/// Insert one normalized path, creating missing intermediate folders.
fn insert_path(nodes: &mut HashMap<String, TreeNode>, root: &str, path: &str) {
    let segments: Vec<&str> = path.split('/').collect();

    // Paths that already start with the root segment walk from the root;
    // paths under a synthesized root are grafted beneath it.
    let (mut current_id, remaining) = if segments.first() == Some(&root) {
        (root.to_string(), &segments[1..])
    } else {
        (root.to_string(), &segments[..])
    };

    for (index, segment) in remaining.iter().enumerate() {
        let child_id = format!("{current_id}/{segment}");
        let is_last = index == remaining.len() - 1;

        if let Some(existing) = nodes.get_mut(&child_id) {
            // A node first seen as a file may turn out to be a folder once a
            // longer path passes through it.
            if !is_last && existing.kind == NodeKind::File {
                existing.kind = NodeKind::Folder;
            }
        } else {
            nodes.insert(
                child_id.clone(),
                TreeNode {
                    id: child_id.clone(),
                    label: (*segment).to_string(),
                    kind: if is_last {
                        NodeKind::File
                    } else {
                        NodeKind::Folder
                    },
                    parent: Some(current_id.clone()),
                    children: Vec::new(),
                    state: InclusionState::Excluded,
                },
            );
            if let Some(parent) = nodes.get_mut(&current_id) {
                parent.children.push(child_id.clone());
            }
        }

        current_id = child_id;
    }
}

/// Sort every node's children: folders before files, then case-sensitive
/// lexicographic by label, for deterministic rendering order.
fn sort_children(nodes: &mut HashMap<String, TreeNode>) {
    let ids: Vec<String> = nodes.keys().cloned().collect();
    for id in ids {
        let Some(children) = nodes.get(&id).map(|n| n.children.clone()) else {
            continue;
        };
        let mut keyed: Vec<(bool, String, String)> = children
            .into_iter()
            .map(|child_id| {
                let (is_file, label) = nodes
                    .get(&child_id)
                    .map_or((true, String::new()), |child| {
                        (child.kind == NodeKind::File, child.label.clone())
                    });
                (is_file, label, child_id)
            })
            .collect();
        keyed.sort();
        if let Some(node) = nodes.get_mut(&id) {
            node.children = keyed.into_iter().map(|(_, _, child_id)| child_id).collect();
        }
    }
}

/// Assign initial inclusion states.
///
/// Root is expanded, the root's direct folder children start collapsed and
/// its direct file children expanded, and everything deeper starts excluded.
/// This keeps huge trees from materializing fully expanded on first render;
/// all later changes go through [`set_state`].
fn assign_initial_states(nodes: &mut HashMap<String, TreeNode>, root: &str) {
    for node in nodes.values_mut() {
        let depth = node.id.matches('/').count();
        node.state = if node.id == root {
            InclusionState::Expanded
        } else if depth == 1 {
            match node.kind {
                NodeKind::Folder => InclusionState::Collapsed,
                NodeKind::File => InclusionState::Expanded,
            }
        } else {
            InclusionState::Excluded
        };
    }
}

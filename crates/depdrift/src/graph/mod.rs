//! The compound graph transformer.
//!
//! Re-derives, from the tree's current inclusion states and the original
//! flat edge list, a compound graph for a generic nested-graph renderer:
//! container nodes (expanded folders), leaf nodes (files with a fully
//! expanded ancestor chain, and collapsed folders), and aggregated
//! leaf-to-leaf edges.
//!
//! The transformer never connects containers: every edge endpoint resolves
//! to the nearest visible leaf representative, and edges whose endpoints
//! vanish (excluded subtrees, paths missing from the tree) are dropped
//! silently. That is a data-quality situation, not a programming error.

pub mod metrics;

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::tree::ProjectTree;
use crate::types::{
    CompoundEdge, CompoundGraph, CompoundNode, DependencyEdge, InclusionState, NodeKind,
};

/// Derive the render-ready compound graph for the tree's current states.
///
/// Nodes are sorted by id; edges keep the first-seen order of the input
/// edge list.
#[must_use]
pub fn to_compound_graph(edges: &[DependencyEdge], tree: &ProjectTree) -> CompoundGraph {
    let nodes = materialize_nodes(tree);
    let edges = aggregate_edges(edges, tree);

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "derived compound graph"
    );

    CompoundGraph { nodes, edges }
}

/// Project every visible tree node into a render node.
fn materialize_nodes(tree: &ProjectTree) -> Vec<CompoundNode> {
    let mut nodes: Vec<CompoundNode> = tree
        .nodes
        .values()
        .filter_map(|node| {
            let is_leaf = match (node.kind, node.state) {
                // Expanded folders group leaves visually but never carry edges.
                (NodeKind::Folder, InclusionState::Expanded) => false,
                (NodeKind::Folder, InclusionState::Collapsed) => true,
                // A visible file is a leaf only when its whole ancestor chain
                // is expanded; the state machine keeps these consistent but
                // the projection does not rely on that.
                (NodeKind::File, InclusionState::Expanded) => {
                    if !ancestors_all_expanded(tree, node.parent.as_deref()) {
                        return None;
                    }
                    true
                }
                (_, InclusionState::Excluded) | (NodeKind::File, InclusionState::Collapsed) => {
                    return None;
                }
            };

            // The tree parent stays the nesting parent only while it is
            // itself rendered as a container; otherwise the node sits
            // directly under the nearest rendered ancestor with no gap.
            let container_parent = node.parent.as_deref().filter(|parent_id| {
                tree.get(parent_id)
                    .is_some_and(|p| p.state == InclusionState::Expanded)
            });

            Some(CompoundNode {
                id: node.id.clone(),
                label: node.label.clone(),
                kind: node.kind,
                container_parent: container_parent.map(String::from),
                is_leaf,
            })
        })
        .collect();

    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    nodes
}

/// Whether every node in the parent chain is `Expanded`.
fn ancestors_all_expanded<'a>(tree: &'a ProjectTree, mut current: Option<&'a str>) -> bool {
    while let Some(id) = current {
        match tree.get(id) {
            Some(node) if node.state == InclusionState::Expanded => {
                current = node.parent.as_deref();
            }
            _ => return false,
        }
    }
    true
}

/// Resolve a raw file path to the leaf id that currently represents it.
///
/// Walking from the file toward the root, the first non-excluded node
/// decides: a collapsed folder is the representative; the file itself is
/// its own representative when it is expanded (its ancestors are then
/// necessarily expanded too); anything else contributes nothing.
fn resolve_leaf(tree: &ProjectTree, raw_path: &str) -> Option<String> {
    let file_id = tree.resolve_path(&crate::paths::normalize_path(raw_path))?;

    let mut current = Some(file_id);
    while let Some(id) = current {
        let node = tree.get(id)?;
        match node.state {
            InclusionState::Excluded => {
                current = node.parent.as_deref();
            }
            InclusionState::Collapsed => return Some(id.to_string()),
            InclusionState::Expanded => {
                // An expanded node above an excluded file means the file is
                // individually hidden; only the file itself being the first
                // visible node makes it an endpoint.
                return (id == file_id).then(|| id.to_string());
            }
        }
    }

    None
}

/// Aggregate raw edges into leaf-to-leaf compound edges.
///
/// This fan-in/fan-out step is what collapses many fine-grained
/// file-to-file edges into one thick folder-to-folder edge when the user
/// collapses a folder.
fn aggregate_edges(edges: &[DependencyEdge], tree: &ProjectTree) -> Vec<CompoundEdge> {
    let mut aggregated: Vec<CompoundEdge> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for edge in edges {
        let Some(source) = resolve_leaf(tree, &edge.source_file) else {
            trace!(source = %edge.source_file, "edge dropped, source endpoint unresolved");
            continue;
        };
        let Some(target) = resolve_leaf(tree, &edge.target_file) else {
            trace!(target = %edge.target_file, "edge dropped, target endpoint unresolved");
            continue;
        };
        if source == target {
            trace!(leaf = %source, "edge dropped, self-loop at current zoom level");
            continue;
        }

        match index.get(&(source.clone(), target.clone())) {
            Some(&at) => {
                let existing = &mut aggregated[at];
                existing.weight += edge.weight;
                if !existing
                    .relationship_types
                    .contains(&edge.relationship_type)
                {
                    existing.relationship_types.push(edge.relationship_type.clone());
                }
                existing.original_edges.push(edge.clone());
            }
            None => {
                index.insert((source.clone(), target.clone()), aggregated.len());
                aggregated.push(CompoundEdge {
                    id: format!("{source}->{target}"),
                    source,
                    target,
                    weight: edge.weight,
                    relationship_types: vec![edge.relationship_type.clone()],
                    original_edges: vec![edge.clone()],
                });
            }
        }
    }

    aggregated
}

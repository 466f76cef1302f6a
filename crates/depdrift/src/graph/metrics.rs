//! Structural metrics over one snapshot's file dependency graph.
//!
//! Computed independently of inclusion states: metrics describe the commit,
//! not the current zoom level. Cycle detection uses Tarjan's strongly
//! connected components over a petgraph `DiGraph` of the tree's file nodes.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::tree::ProjectTree;
use crate::types::{DependencyEdge, NodeKind, SnapshotMetrics};

/// Compute file/edge totals, cycle paths, and orphaned files for a snapshot.
///
/// Edges whose endpoints did not survive normalization into the tree are
/// ignored, mirroring the transformer's permissive handling.
#[must_use]
pub fn snapshot_metrics(edges: &[DependencyEdge], tree: &ProjectTree) -> SnapshotMetrics {
    let mut file_ids: Vec<&str> = tree
        .nodes
        .values()
        .filter(|node| node.kind == NodeKind::File)
        .map(|node| node.id.as_str())
        .collect();
    file_ids.sort_unstable();

    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();
    for &id in &file_ids {
        node_map.insert(id, graph.add_node(id));
    }

    let mut connected: HashSet<NodeIndex> = HashSet::new();
    let mut resolved_edges = 0;
    let mut seen_pairs: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

    for edge in edges {
        let source = tree
            .resolve_path(&crate::paths::normalize_path(&edge.source_file))
            .and_then(|id| node_map.get(id).copied());
        let target = tree
            .resolve_path(&crate::paths::normalize_path(&edge.target_file))
            .and_then(|id| node_map.get(id).copied());
        let (Some(source), Some(target)) = (source, target) else {
            continue;
        };

        resolved_edges += 1;
        connected.insert(source);
        connected.insert(target);
        // Parallel edges with different relationships are one structural edge.
        if seen_pairs.insert((source, target)) {
            graph.add_edge(source, target, ());
        }
    }

    // Strongly connected components of more than one node are cycles.
    let cycles: Vec<Vec<String>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| {
            component
                .into_iter()
                .map(|index| graph[index].to_string())
                .collect()
        })
        .collect();

    let orphaned_files: Vec<String> = file_ids
        .iter()
        .filter(|&&id| {
            node_map
                .get(id)
                .is_some_and(|index| !connected.contains(index))
        })
        .map(|&id| id.to_string())
        .collect();

    debug!(
        files = file_ids.len(),
        dependencies = resolved_edges,
        cycles = cycles.len(),
        orphans = orphaned_files.len(),
        "computed snapshot metrics"
    );

    SnapshotMetrics {
        total_files: file_ids.len(),
        total_dependencies: resolved_edges,
        cycles,
        orphaned_files,
    }
}

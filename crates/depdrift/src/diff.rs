//! Commit-to-commit dependency diffing.
//!
//! Two commits' edge lists are partitioned by structural identity
//! (source + target + relationship; weight is not identity). The calculator
//! is pure and deterministic, preserving stable input order within each
//! partition.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{DependencyDiff, DependencyEdge};

/// Partition the edges of commit B against commit A.
///
/// Edges of B are `added` (identity absent from A) or `unchanged` (present
/// in both, B's copy kept); edges of A whose identity is absent from B are
/// `removed`.
#[must_use]
pub fn diff_edges(edges_a: &[DependencyEdge], edges_b: &[DependencyEdge]) -> DependencyDiff {
    let keys_a: HashSet<String> = edges_a.iter().map(DependencyEdge::identity_key).collect();
    let keys_b: HashSet<String> = edges_b.iter().map(DependencyEdge::identity_key).collect();

    let mut diff = DependencyDiff::default();

    for edge in edges_b {
        if keys_a.contains(&edge.identity_key()) {
            diff.unchanged.push(edge.clone());
        } else {
            diff.added.push(edge.clone());
        }
    }

    for edge in edges_a {
        if !keys_b.contains(&edge.identity_key()) {
            diff.removed.push(edge.clone());
        }
    }

    debug!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        unchanged = diff.unchanged.len(),
        "diffed edge lists"
    );

    diff
}

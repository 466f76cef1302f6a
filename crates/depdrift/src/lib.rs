//! # depdrift: dependency evolution transformation core
//!
//! depdrift turns the flat file-to-file dependency edges extracted per
//! commit by an external analyzer into render-ready structures: a rooted
//! directory tree with a tri-state inclusion model, a compound graph
//! (nested containers plus aggregated leaf-to-leaf edges) derived from the
//! current states, and structural diffs between commits.
//!
//! ## Design Philosophy
//!
//! - **Pure transformations** - every operation maps an input tree/edge
//!   list to a new value; nothing is mutated in place, nothing blocks
//! - **Permissive fallbacks, not validation** - malformed paths, stale node
//!   ids, and unresolvable endpoints degrade to "nothing to render"
//! - **Leaves carry edges, containers never do** - expanded folders only
//!   group; collapsed folders and fully-expanded files are the endpoints
//! - **Rebuilt per snapshot** - switching commits replaces the tree
//!   wholesale; within a snapshot only inclusion states change
//!
//! ## Quick Start
//!
//! ```
//! use depdrift::{DependencyEdge, InclusionState, build_tree, set_state, to_compound_graph};
//!
//! let edges = vec![DependencyEdge::new("app/x.txt", "app/b/y.txt", "import")];
//!
//! let tree = build_tree(&edges);
//! let tree = set_state(&tree, "app/b", InclusionState::Collapsed);
//!
//! let graph = to_compound_graph(&edges, &tree);
//! assert_eq!(graph.edges.len(), 1);
//! assert_eq!(graph.edges[0].target, "app/b");
//! ```

mod diff;
mod error;
mod graph;
mod paths;
mod tree;
mod types;

pub use diff::diff_edges;
pub use error::{Error, Result};
pub use graph::metrics::snapshot_metrics;
pub use graph::to_compound_graph;
pub use paths::{
    APP_LAYOUT_ROOT, HeuristicRoot, PLACEHOLDER_ROOT, RootStrategy, is_internal_path,
    normalize_path,
};
pub use tree::{ProjectTree, build_tree, build_tree_with, set_state};
pub use types::{
    CompoundEdge, CompoundGraph, CompoundNode, DependencyDiff, DependencyEdge, DiffSummary,
    InclusionState, NodeKind, Snapshot, SnapshotMetrics, TreeNode,
};

//! Domain types for the depdrift transformation core.
//!
//! These types fall into three layers:
//! - **Input**: `DependencyEdge`, `Snapshot` (the analyzer collaborator's output, accepted as-is)
//! - **Tree**: `TreeNode`, `InclusionState`, `NodeKind` (the rooted directory tree and its
//!   tri-state visibility model)
//! - **Output**: `CompoundNode`, `CompoundEdge`, `CompoundGraph`, `DependencyDiff`,
//!   `SnapshotMetrics` (render-facing projections and diff results)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Node id | Normalized path `String` | Paths are the natural stable identity across rebuilds |
//! | Edge fields | `source_file` etc. | Fixed by the analyzer collaborator's JSON format |
//! | `Collapsed` | Distinct from `Excluded` | Collapsed folders stay visible as opaque leaves |
//! | Diff identity | source+target+relationship | Weight changes are not structural changes |

use serde::{Deserialize, Serialize};

use crate::error::Result;
use std::path::Path;

// ============================================================================
// Input: analyzer edges and commit snapshots
// ============================================================================

fn default_weight() -> u32 {
    1
}

/// A file-to-file dependency extracted by the external analyzer.
///
/// Field names match the analyzer collaborator's output format and must be
/// accepted as-is. Multiple edges may share a (source, target) pair with
/// different relationship types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Path of the file that declares the dependency.
    pub source_file: String,
    /// Path of the file being depended on.
    pub target_file: String,
    /// Kind of dependency (e.g. "import", "export", "part").
    pub relationship_type: String,
    /// Reference count; the analyzer may omit it, in which case it is 1.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl DependencyEdge {
    /// Create an edge with the default weight of 1.
    #[must_use]
    pub fn new(
        source_file: impl Into<String>,
        target_file: impl Into<String>,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            target_file: target_file.into(),
            relationship_type: relationship_type.into(),
            weight: 1,
        }
    }

    /// Structural identity of this edge for commit-to-commit diffing.
    ///
    /// Weight is deliberately excluded: an edge whose reference count changed
    /// between commits is still the same edge.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!(
            "{}\u{2192}{}\u{2192}{}",
            self.source_file, self.target_file, self.relationship_type
        )
    }
}

/// The dependency edge set of one analyzed commit.
///
/// This is the slice of the analyzer's per-commit output that the
/// transformation core consumes. Clone/checkout/analyzer metadata stays with
/// the collaborators that produce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Commit hash this edge set was extracted from.
    pub commit_hash: String,
    /// Commit timestamp (unix seconds), passed through from the analyzer.
    #[serde(default)]
    pub timestamp: i64,
    /// All file-to-file dependencies at this commit.
    pub edges: Vec<DependencyEdge>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file produced by the analyzer cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid snapshot JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

// ============================================================================
// Tree: nodes and the tri-state inclusion model
// ============================================================================

/// Whether a tree node represents a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A source file (always a tree leaf).
    File,
    /// A directory (may contain files and other folders).
    Folder,
}

/// The tri-state inclusion value owned by every tree node.
///
/// `Collapsed` is volitional: it is only ever set by a direct user edit on
/// that node, never inferred from children. Upward propagation recomputes
/// ancestors as `Excluded` or `Expanded` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InclusionState {
    /// Node is visible and its children participate down to their own state.
    Expanded,
    /// Node is visible as a single opaque representative; the entire subtree
    /// beneath it is forced `Excluded`.
    Collapsed,
    /// Node and everything beneath it are invisible and participate in nothing.
    Excluded,
}

impl InclusionState {
    /// Whether a node in this state is rendered at all.
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Expanded | Self::Collapsed)
    }

    /// String form used in human-readable output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
            Self::Excluded => "excluded",
        }
    }
}

/// One node of the rooted project tree.
///
/// Invariants (maintained by the tree builder, checked by its tests):
/// - a non-root node's `parent` is its own id minus the last path segment
/// - `children` are exactly the node ids whose `parent` is this node,
///   sorted folders-before-files then lexicographically
/// - a `File` node has no children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Normalized slash-delimited path, unique within the tree.
    pub id: String,
    /// Last path segment, for display.
    pub label: String,
    /// File or folder.
    pub kind: NodeKind,
    /// Parent node id; `None` only for the tree root.
    pub parent: Option<String>,
    /// Child node ids in render order.
    pub children: Vec<String>,
    /// Current inclusion state.
    pub state: InclusionState,
}

// ============================================================================
// Output: compound graph projections
// ============================================================================

/// Render-facing projection of a visible tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundNode {
    /// Tree node id.
    pub id: String,
    /// Display label (last path segment).
    pub label: String,
    /// File or folder.
    pub kind: NodeKind,
    /// Nesting parent for the renderer, set only when the tree parent is
    /// itself rendered as a container.
    pub container_parent: Option<String>,
    /// Whether this node may carry edges. Containers (expanded folders)
    /// never do.
    pub is_leaf: bool,
}

/// An aggregated edge between two leaf nodes of the compound graph.
///
/// Many fine-grained file-to-file edges collapse into one edge when a folder
/// endpoint is collapsed; `original_edges` preserves the constituents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundEdge {
    /// Stable edge id, `source + "->" + target`.
    pub id: String,
    /// Source leaf id.
    pub source: String,
    /// Target leaf id.
    pub target: String,
    /// Sum of the constituent edge weights.
    pub weight: u32,
    /// Deduplicated relationship types of the constituents, in first-seen order.
    pub relationship_types: Vec<String>,
    /// The dependency edges aggregated into this edge.
    pub original_edges: Vec<DependencyEdge>,
}

/// The complete render-ready graph derived from one tree state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompoundGraph {
    /// Visible nodes, containers and leaves, sorted by id.
    pub nodes: Vec<CompoundNode>,
    /// Aggregated leaf-to-leaf edges in first-seen order.
    pub edges: Vec<CompoundEdge>,
}

impl CompoundGraph {
    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&CompoundNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of all leaf nodes.
    #[must_use]
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf)
            .map(|n| n.id.as_str())
            .collect()
    }
}

// ============================================================================
// Output: commit-to-commit diff
// ============================================================================

/// Partition of two commits' edge sets by structural identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyDiff {
    /// Edges present in B but not in A (B's copies).
    pub added: Vec<DependencyEdge>,
    /// Edges present in A but not in B (A's copies).
    pub removed: Vec<DependencyEdge>,
    /// Edges present in both (B's copies).
    pub unchanged: Vec<DependencyEdge>,
}

impl DependencyDiff {
    /// Reduce the diff to counts.
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        DiffSummary {
            added: self.added.len(),
            removed: self.removed.len(),
            unchanged: self.unchanged.len(),
            total_before: self.removed.len() + self.unchanged.len(),
            total_after: self.added.len() + self.unchanged.len(),
        }
    }
}

/// Count view of a [`DependencyDiff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Number of edges only in the newer commit.
    pub added: usize,
    /// Number of edges only in the older commit.
    pub removed: usize,
    /// Number of edges in both commits.
    pub unchanged: usize,
    /// Total edge count of the older commit (by identity key).
    pub total_before: usize,
    /// Total edge count of the newer commit (by identity key).
    pub total_after: usize,
}

// ============================================================================
// Output: snapshot metrics
// ============================================================================

/// Structural metrics for one commit's dependency graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotMetrics {
    /// Number of files in the project tree.
    pub total_files: usize,
    /// Number of dependency edges that resolved to tree files.
    pub total_dependencies: usize,
    /// Circular dependency paths, each a list of file ids.
    pub cycles: Vec<Vec<String>>,
    /// Files with no dependencies in either direction.
    pub orphaned_files: Vec<String>,
}

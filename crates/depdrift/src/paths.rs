//! Path normalization, filtering, and root inference.
//!
//! Analyzer output arrives with noisy paths: Windows separators, doubled
//! slashes, and absolute prefixes pointing into this tool's own staging area
//! (the per-commit checkouts the analyzer ran against). This module cleans
//! those paths and infers the project's logical root from path statistics
//! alone, since the analyzer embeds no repository name.
//!
//! Root inference is best-effort by nature, so it lives behind the
//! [`RootStrategy`] trait; alternative heuristics can be swapped without
//! touching the tree builder.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::types::DependencyEdge;

/// Root label used when no dominant prefix or recognizable layout exists.
pub const PLACEHOLDER_ROOT: &str = "project";

/// Root label synthesized above a recognized application layout.
pub const APP_LAYOUT_ROOT: &str = "app";

/// Sibling directory names that identify a conventional application layout
/// (source, tests, integration tests, test doubles and friends).
const APP_LAYOUT_DIRS: &[&str] = &[
    "lib",
    "bin",
    "src",
    "test",
    "tests",
    "integration_test",
    "test_driver",
    "example",
    "tool",
    "web",
];

/// Prefixes of this tool's own staging-area layout, stripped before paths
/// enter the tree. The analyzer runs against per-commit checkouts under
/// these directories and reports paths relative to wherever it was invoked.
static STAGING_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Per-repository clone staging: .../depdrift/repos/<repo>-<timestamp>/
        r"^(?:.*/)?depdrift/repos/[^/]+/",
        // Per-commit worktrees under the cache dir: .../.depdrift/stage/<hash>/
        r"^(?:.*/)?\.depdrift/stage/[^/]+/",
        // Fallback temp clones: .../tmp/depdrift-<nonce>/
        r"^(?:.*/)?tmp/depdrift-[^/]+/",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("staging prefix patterns are valid"))
    .collect()
});

/// Normalize a raw analyzer path for use as a tree node id.
///
/// Backslashes become forward slashes, repeated slashes collapse, staging
/// prefixes are stripped, and a leading slash is removed.
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let forward = raw.replace('\\', "/");

    let mut collapsed = String::with_capacity(forward.len());
    let mut prev_slash = false;
    for c in forward.chars() {
        if c == '/' {
            if !prev_slash {
                collapsed.push(c);
            }
            prev_slash = true;
        } else {
            collapsed.push(c);
            prev_slash = false;
        }
    }

    let mut cleaned = collapsed.as_str();
    for prefix in STAGING_PREFIXES.iter() {
        if let Some(m) = prefix.find(cleaned) {
            cleaned = &cleaned[m.end()..];
            break;
        }
    }

    cleaned.trim_start_matches('/').to_string()
}

/// Whether a normalized path points at OS or build-system internals that
/// should never enter the project tree.
///
/// The filter is deliberately permissive: over-filtering silently deletes
/// real project files, so only unmistakable internals are dropped.
#[must_use]
pub fn is_internal_path(path: &str) -> bool {
    let Some(first) = path.split('/').next() else {
        return true;
    };

    // OS temp/proc/sys trees only make sense as the leading segment.
    if matches!(first, "proc" | "sys" | "dev" | "tmp" | "var") {
        return true;
    }

    // Version-control internals and dependency-manager trees can appear at
    // any depth (the analyzer may have descended into them).
    path.split('/').any(|segment| {
        matches!(
            segment,
            ".git" | ".svn" | ".hg" | "node_modules" | ".pub-cache" | ".dart_tool" | "__pycache__"
        )
    })
}

/// Collect the distinct normalized paths referenced by an edge list,
/// dropping internal paths, in first-seen order.
#[must_use]
pub fn collect_paths(edges: &[DependencyEdge]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for raw in edges
        .iter()
        .flat_map(|e| [e.source_file.as_str(), e.target_file.as_str()])
    {
        let path = normalize_path(raw);
        if path.is_empty() || is_internal_path(&path) {
            trace!(raw, "dropping internal or empty path");
            continue;
        }
        if seen.insert(path.clone()) {
            paths.push(path);
        }
    }

    paths
}

/// Strategy for inferring the project's logical root label from its paths.
///
/// Root detection is heuristic and may need tuning per project convention,
/// so the tree builder depends only on this seam.
pub trait RootStrategy {
    /// Infer a root label for a set of normalized, filtered paths.
    ///
    /// Implementations must always produce a label; ambiguous input degrades
    /// to a placeholder rather than failing.
    fn infer_root(&self, paths: &[String]) -> String;
}

/// Default statistical root inference.
///
/// Never reads configuration. Candidate prefixes of one to three segments
/// are weighted by how many paths they cover:
/// - a single top-level segment covering every path is the root
/// - multiple top-level segments matching a conventional application layout
///   get the synthetic root [`APP_LAYOUT_ROOT`] above them
/// - otherwise a sole top-level segment wins, else [`PLACEHOLDER_ROOT`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRoot;

impl RootStrategy for HeuristicRoot {
    fn infer_root(&self, paths: &[String]) -> String {
        if paths.is_empty() {
            return PLACEHOLDER_ROOT.to_string();
        }

        // Coverage of every candidate prefix of 1-3 segments. BTreeMap keeps
        // candidate ranking deterministic across runs.
        let mut coverage: BTreeMap<String, usize> = BTreeMap::new();
        for path in paths {
            let segments: Vec<&str> = path.split('/').collect();
            // The last segment is the file itself, never a root candidate.
            for depth in 1..segments.len().min(4) {
                let prefix = segments[..depth].join("/");
                *coverage.entry(prefix).or_insert(0) += 1;
            }
        }

        if let Some((best, count)) = coverage
            .iter()
            .max_by_key(|(prefix, count)| (**count, std::cmp::Reverse(prefix.len())))
        {
            trace!(candidate = %best, coverage = count, total = paths.len(), "best root candidate");
        }

        let top_level: BTreeMap<&str, usize> = coverage
            .iter()
            .filter(|(prefix, _)| !prefix.contains('/'))
            .map(|(prefix, count)| (prefix.as_str(), *count))
            .collect();

        // One top-level segment covering 100% of paths is the root.
        if top_level.len() == 1 {
            if let Some((only, count)) = top_level.first_key_value() {
                if *count == paths.len() {
                    debug!(root = only, "single top-level segment covers all paths");
                    return (*only).to_string();
                }
            }
        }

        // Sibling directories that look like a conventional application
        // layout get a synthetic root above them.
        let is_app_layout = top_level.len() > 1
            && top_level.contains_key("lib")
            && top_level.keys().all(|top| APP_LAYOUT_DIRS.contains(top));
        if is_app_layout {
            debug!(root = APP_LAYOUT_ROOT, "recognized application layout");
            return APP_LAYOUT_ROOT.to_string();
        }

        if top_level.len() == 1 {
            if let Some((only, _)) = top_level.first_key_value() {
                return (*only).to_string();
            }
        }

        debug!(
            root = PLACEHOLDER_ROOT,
            top_level_segments = top_level.len(),
            "no dominant prefix, falling back to placeholder root"
        );
        PLACEHOLDER_ROOT.to_string()
    }
}

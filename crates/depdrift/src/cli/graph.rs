//! `depdrift graph` command implementation.

use std::path::Path;

use colored::Colorize;
use depdrift::{InclusionState, ProjectTree, Snapshot, build_tree, set_state, to_compound_graph};
use tracing::warn;

/// Run the graph command.
///
/// State edits are applied in expand, collapse, exclude order; unknown
/// paths are no-ops, exactly as interactive edits against a stale tree are.
pub fn run(
    snapshot_path: &Path,
    expand: &[String],
    collapse: &[String],
    exclude: &[String],
    json: bool,
) -> Result<(), depdrift::Error> {
    let snapshot = Snapshot::load(snapshot_path)?;
    let mut tree = build_tree(&snapshot.edges);

    let edits = expand
        .iter()
        .map(|p| (p, InclusionState::Expanded))
        .chain(collapse.iter().map(|p| (p, InclusionState::Collapsed)))
        .chain(exclude.iter().map(|p| (p, InclusionState::Excluded)));

    for (path, state) in edits {
        let Some(id) = tree.resolve_path(path).map(String::from) else {
            warn!(path, "no tree node for path, ignoring state edit");
            continue;
        };
        tree = set_state(&tree, &id, state);
    }

    let graph = to_compound_graph(&snapshot.edges, &tree);

    if json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
        return Ok(());
    }

    print_report(&tree, &graph);
    Ok(())
}

fn print_report(tree: &ProjectTree, graph: &depdrift::CompoundGraph) {
    println!("{}", "Compound Graph".cyan().bold());
    println!();

    println!(
        "  {}: {} ({} leaves)",
        "Nodes".white().bold(),
        graph.nodes.len(),
        graph.leaf_ids().len()
    );
    for node in &graph.nodes {
        let shape = if node.is_leaf {
            "leaf".green()
        } else {
            "container".blue()
        };
        let nesting = node
            .container_parent
            .as_deref()
            .map_or(String::new(), |p| format!(" in {p}"));
        println!(
            "    {} {}{}{}",
            shape,
            node.id,
            nesting.dimmed(),
            format!(" (depth {})", tree.depth(&node.id)).dimmed()
        );
    }
    println!();

    println!("  {}: {}", "Edges".white().bold(), graph.edges.len());
    for edge in &graph.edges {
        println!(
            "    {} {} {} {} ({})",
            edge.source,
            "->".dimmed(),
            edge.target,
            format!("x{}", edge.weight).yellow(),
            edge.relationship_types.join(", ")
        );
    }
}

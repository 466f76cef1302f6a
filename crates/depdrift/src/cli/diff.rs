//! `depdrift diff` command implementation.

use std::path::Path;

use colored::Colorize;
use depdrift::{DependencyEdge, Snapshot, diff_edges};

/// Run the diff command.
pub fn run(before_path: &Path, after_path: &Path, json: bool) -> Result<(), depdrift::Error> {
    let before = Snapshot::load(before_path)?;
    let after = Snapshot::load(after_path)?;

    let diff = diff_edges(&before.edges, &after.edges);

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
        return Ok(());
    }

    let summary = diff.summary();
    println!(
        "{} {} {} {}",
        "Dependency diff".cyan().bold(),
        before.commit_hash,
        "->".dimmed(),
        after.commit_hash
    );
    println!();
    println!(
        "  {} added, {} removed, {} unchanged ({} -> {} edges)",
        summary.added.to_string().green(),
        summary.removed.to_string().red(),
        summary.unchanged,
        summary.total_before,
        summary.total_after
    );
    println!();

    for edge in &diff.added {
        println!("  {} {}", "+".green().bold(), format_edge(edge));
    }
    for edge in &diff.removed {
        println!("  {} {}", "-".red().bold(), format_edge(edge));
    }

    Ok(())
}

fn format_edge(edge: &DependencyEdge) -> String {
    format!(
        "{} -> {} ({})",
        edge.source_file, edge.target_file, edge.relationship_type
    )
}

//! `depdrift metrics` command implementation.

use std::path::Path;

use colored::Colorize;
use depdrift::{Snapshot, build_tree, snapshot_metrics};

/// Run the metrics command.
pub fn run(snapshot_path: &Path, json: bool) -> Result<(), depdrift::Error> {
    let snapshot = Snapshot::load(snapshot_path)?;
    let tree = build_tree(&snapshot.edges);
    let metrics = snapshot_metrics(&snapshot.edges, &tree);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Snapshot metrics for".cyan().bold(),
        snapshot.commit_hash
    );
    println!();
    println!(
        "  {}: {}",
        "Files".white().bold(),
        metrics.total_files.to_string().green()
    );
    println!(
        "  {}: {}",
        "Dependencies".white().bold(),
        metrics.total_dependencies.to_string().green()
    );

    if metrics.cycles.is_empty() {
        println!("  {}: none", "Cycles".white().bold());
    } else {
        println!(
            "  {}: {}",
            "Cycles".white().bold(),
            metrics.cycles.len().to_string().yellow()
        );
        for cycle in &metrics.cycles {
            println!("    {}", cycle.join(" -> ").yellow());
        }
    }

    if metrics.orphaned_files.is_empty() {
        println!("  {}: none", "Orphans".white().bold());
    } else {
        println!(
            "  {}: {}",
            "Orphans".white().bold(),
            metrics.orphaned_files.len()
        );
        for orphan in &metrics.orphaned_files {
            println!("    {}", orphan.dimmed());
        }
    }

    Ok(())
}

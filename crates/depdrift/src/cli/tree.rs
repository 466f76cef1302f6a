//! `depdrift tree` command implementation.

use std::path::Path;

use colored::Colorize;
use depdrift::{InclusionState, ProjectTree, Snapshot, build_tree};

/// Run the tree command.
pub fn run(snapshot_path: &Path) -> Result<(), depdrift::Error> {
    let snapshot = Snapshot::load(snapshot_path)?;
    let tree = build_tree(&snapshot.edges);

    println!(
        "{} {} ({} nodes)",
        "Project tree for".cyan().bold(),
        snapshot.commit_hash,
        tree.len()
    );
    println!();
    print_subtree(&tree, &tree.root_id, 0);

    Ok(())
}

fn print_subtree(tree: &ProjectTree, id: &str, depth: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };

    let marker = match node.state {
        InclusionState::Expanded => "[x]".green(),
        InclusionState::Collapsed => "[-]".yellow(),
        InclusionState::Excluded => "[ ]".dimmed(),
    };
    println!("{}{} {}", "  ".repeat(depth), marker, node.label);

    for child_id in &node.children {
        print_subtree(tree, child_id, depth + 1);
    }
}

//! depdrift CLI - dependency evolution from the command line.
//!
//! Reads per-commit snapshot JSON produced by the analyzer cache and prints
//! the project tree, the compound graph for a chosen set of inclusion
//! states, commit-to-commit diffs, and structural metrics.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// depdrift: tree and compound-graph transformation core.
#[derive(Parser)]
#[command(name = "depdrift")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the project tree for a snapshot
    Tree {
        /// Snapshot JSON file (analyzer edge format)
        snapshot: PathBuf,
    },

    /// Derive the compound graph for a snapshot
    Graph {
        /// Snapshot JSON file (analyzer edge format)
        snapshot: PathBuf,

        /// Expand a node before deriving (repeatable)
        #[arg(long, value_name = "PATH")]
        expand: Vec<String>,

        /// Collapse a node before deriving (repeatable)
        #[arg(long, value_name = "PATH")]
        collapse: Vec<String>,

        /// Exclude a node before deriving (repeatable)
        #[arg(long, value_name = "PATH")]
        exclude: Vec<String>,

        /// Emit JSON instead of a human-readable report
        #[arg(long)]
        json: bool,
    },

    /// Diff the dependency edges of two snapshots
    Diff {
        /// Older snapshot JSON file
        before: PathBuf,

        /// Newer snapshot JSON file
        after: PathBuf,

        /// Emit JSON instead of a human-readable report
        #[arg(long)]
        json: bool,
    },

    /// Show structural metrics for a snapshot
    Metrics {
        /// Snapshot JSON file (analyzer edge format)
        snapshot: PathBuf,

        /// Emit JSON instead of a human-readable report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Tree { snapshot } => cli::tree::run(&snapshot),
        Commands::Graph {
            snapshot,
            expand,
            collapse,
            exclude,
            json,
        } => cli::graph::run(&snapshot, &expand, &collapse, &exclude, json),
        Commands::Diff {
            before,
            after,
            json,
        } => cli::diff::run(&before, &after, json),
        Commands::Metrics { snapshot, json } => cli::metrics::run(&snapshot, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

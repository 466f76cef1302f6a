//! CLI command implementations.

pub mod diff;
pub mod graph;
pub mod metrics;
pub mod tree;

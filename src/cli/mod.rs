//! Command-line interface for confpod.
//!
//! This module provides commands for enriching the catalog, rebuilding the
//! feed, and inspecting pending work. With no command, the full pipeline
//! runs.

mod commands;

pub use commands::{Cli, Commands, run_command};

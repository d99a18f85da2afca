//! CLI module for hexa-showcase.
//!
//! Argument parsing, command handlers and output formatting live here so
//! they can be tested without spawning the binary.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{copy_with, log_filter, run_cli};
pub use output::{format_targets, format_timeline, format_validation};

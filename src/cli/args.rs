//! CLI argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terminal showcase for the HEXA CLI.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "hexa-showcase",
    version,
    long_version = concat!(env!("HEXA_SHOWCASE_VERSION"), " (", env!("GIT_HASH"), ")"),
    about
)]
pub struct Args {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Play the typewriter demos on stdout
    Play {
        /// Showcase YAML (defaults to the built-in HEXA CLI demos)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop after this many demos (default: loop forever)
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Print every state change with its timestamp
    Timeline {
        /// Showcase YAML (defaults to the built-in HEXA CLI demos)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of demos to record
        #[arg(long, default_value_t = 1)]
        cycles: u64,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate a showcase YAML file
    Validate {
        /// Path to the file
        path: PathBuf,
    },
    /// List the copy targets
    Targets {
        /// Showcase YAML (defaults to the built-in HEXA CLI demos)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Copy a target's text to the system clipboard
    Copy {
        /// Copy target key, e.g. `nav-install`
        key: String,
        /// Showcase YAML (defaults to the built-in HEXA CLI demos)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

//! hexa-showcase CLI
//!
//! Plays the HEXA CLI terminal demos and copies install commands.

use std::process::ExitCode;

use clap::Parser;
use hexa_showcase::cli::{log_filter, run_cli, Args};

fn main() -> ExitCode {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run_cli(Args::parse())
}

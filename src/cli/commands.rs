//! CLI command handlers.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use crate::clipboard::{ClipboardBackend, ClipboardEcho};
use crate::config::ShowcaseConfig;
use crate::engine::ShowTime;
use crate::error::{ShowcaseError, ShowcaseResult};
use crate::player::Player;
use crate::sequencer::{Sequencer, Timeline};
use tracing_subscriber::EnvFilter;

use super::output::{format_targets, format_timeline, format_validation};
use super::{Args, Command};

/// Log filter from a `RUST_LOG` value; `warn` when unset or unparsable.
#[must_use]
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let result = match args.command {
        Command::Play { config, cycles } => play(config.as_deref(), cycles),
        Command::Timeline {
            config,
            cycles,
            json,
        } => timeline(config.as_deref(), cycles, json),
        Command::Validate { path } => validate(&path),
        Command::Targets { config } => targets(config.as_deref()),
        Command::Copy { key, config } => copy(config.as_deref(), &key),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn play(config: Option<&Path>, cycles: Option<u64>) -> ShowcaseResult<ExitCode> {
    let config = ShowcaseConfig::load_or_embedded(config)?;
    let sequencer = Sequencer::from_config(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let mut player = Player::new(sequencer, std::io::stdout());
    runtime.block_on(player.play(cycles))?;
    println!();
    Ok(ExitCode::SUCCESS)
}

fn timeline(config: Option<&Path>, cycles: u64, json: bool) -> ShowcaseResult<ExitCode> {
    let config = ShowcaseConfig::load_or_embedded(config)?;
    let mut sequencer = Sequencer::from_config(&config)?;
    let timeline = Timeline::record_cycles(&mut sequencer, ShowTime::ZERO, cycles);

    if json {
        println!("{}", timeline.to_json()?);
    } else {
        print!("{}", format_timeline(&timeline, &config));
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(path: &Path) -> ShowcaseResult<ExitCode> {
    println!("Validating: {}\n", path.display());
    match ShowcaseConfig::load(path) {
        Ok(config) => {
            print!("{}", format_validation(&config));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("✗ {e}");
            Ok(ExitCode::from(1))
        }
    }
}

fn targets(config: Option<&Path>) -> ShowcaseResult<ExitCode> {
    let config = ShowcaseConfig::load_or_embedded(config)?;
    print!("{}", format_targets(&config));
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "clipboard")]
fn copy(config: Option<&Path>, key: &str) -> ShowcaseResult<ExitCode> {
    let config = ShowcaseConfig::load_or_embedded(config)?;
    // The process exits right after this write.
    let backend = crate::clipboard::SystemClipboard::one_shot();
    let copied = copy_with(&config, key, backend, &mut std::io::stdout())?;
    Ok(if copied {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(not(feature = "clipboard"))]
fn copy(_config: Option<&Path>, _key: &str) -> ShowcaseResult<ExitCode> {
    Err(ShowcaseError::config(
        "clipboard support not compiled in; rebuild with --features clipboard",
    ))
}

/// Copy the target named `key` through Clipboard Echo and report the flag.
///
/// Returns whether the flag went up.
///
/// # Errors
///
/// Returns a configuration error for an unknown key, or an I/O error if
/// `out` fails. Clipboard failures are not errors here.
pub fn copy_with<B: ClipboardBackend>(
    config: &ShowcaseConfig,
    key: &str,
    backend: B,
    out: &mut impl Write,
) -> ShowcaseResult<bool> {
    let target = config
        .copy_target(key)
        .ok_or_else(|| ShowcaseError::config(format!("unknown copy target '{key}'")))?;

    let mut echo = ClipboardEcho::new(backend);
    let copied = echo.copy(&target.text, key, ShowTime::ZERO);
    if copied {
        writeln!(out, "✓ Copied: {}", target.text)?;
    } else {
        writeln!(out, "✗ Could not copy '{key}' (set RUST_LOG=warn for details)")?;
    }
    Ok(copied)
}

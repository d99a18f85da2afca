//! CLI output formatting.
//!
//! Formatting is kept separate from printing so it can be tested.

use std::fmt::Write;

use crate::config::ShowcaseConfig;
use crate::sequencer::{Phase, Timeline};

/// One line per state change: time, demo, phase and what is on screen.
#[must_use]
pub fn format_timeline(timeline: &Timeline, config: &ShowcaseConfig) -> String {
    let mut out = String::new();
    for entry in timeline.entries() {
        let state = &entry.state;
        let screen = match state.phase {
            Phase::Typing => format!("{} {}▌", config.prompt, state.typed_prefix),
            Phase::Executing => state.emitted_lines.last().cloned().unwrap_or_default(),
        };
        let phase = match state.phase {
            Phase::Typing => "typing",
            Phase::Executing => "exec",
        };
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{:>9}  demo {}  {:<6}  {}",
            entry.at.to_string(),
            state.active_demo,
            phase,
            screen
        );
    }
    out
}

/// Summary of a configuration that passed validation.
#[must_use]
pub fn format_validation(config: &ShowcaseConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✓ Schema version {}", config.schema_version);
    let _ = writeln!(out, "✓ Prompt: {}", config.prompt);
    let _ = writeln!(out, "✓ {} demo(s):", config.demos.len());
    for (i, demo) in config.demos.iter().enumerate() {
        let secs = config.timing.cycle_duration(demo) as f64 / 1000.0;
        let _ = writeln!(
            out,
            "    {i}. {}  ({} output line(s), {secs:.2}s cycle)",
            demo.command,
            demo.outputs.len()
        );
    }
    let _ = writeln!(out, "✓ {} copy target(s)", config.copy_targets.len());
    out
}

/// Table of copy targets.
#[must_use]
pub fn format_targets(config: &ShowcaseConfig) -> String {
    if config.copy_targets.is_empty() {
        return "No copy targets defined.\n".to_string();
    }
    let width = config
        .copy_targets
        .iter()
        .map(|t| t.key.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for target in &config.copy_targets {
        let _ = writeln!(out, "{:<width$}  {}", target.key, target.text);
    }
    out
}

//! TUI module for hexa-showcase.
//!
//! Application state and key handling for the terminal showcase. Terminal
//! I/O stays in `bin/showcase_tui.rs`; everything testable lives here.

#[cfg(feature = "tui")]
pub mod showcase_app;

//! # hexa-showcase
//!
//! Terminal-demo playback for the HEXA CLI showcase.
//!
//! Two small state machines driven by one deterministic clock:
//! - the Sequencer types a command, echoes it, prints its output lines,
//!   pauses and moves on to the next demo, forever;
//! - Clipboard Echo copies text and raises a "copied" flag for two seconds.
//!
//! All timing lives in a single deadline queue, so the same inputs always
//! produce the same sequence of states.
//!
//! ## Example
//!
//! ```rust
//! use hexa_showcase::prelude::*;
//!
//! let mut seq = Sequencer::new(
//!     vec![CommandDemo::new("a", ["x"])],
//!     SequencerTiming::default(),
//!     "$",
//! )
//! .unwrap();
//! seq.start(ShowTime::ZERO);
//! seq.advance_to(ShowTime::from_millis(50));
//! assert_eq!(seq.state().typed_prefix, "a");
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod error;
pub mod player;
pub mod sequencer;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clipboard::{ClipboardBackend, ClipboardEcho, MemoryClipboard};
    pub use crate::config::{CopyTarget, ShowcaseConfig};
    pub use crate::engine::{ShowClock, ShowTime, TimerQueue};
    pub use crate::error::{ClipboardError, ShowcaseError, ShowcaseResult};
    pub use crate::sequencer::{
        CommandDemo, Phase, Sequencer, SequencerState, SequencerTiming, Timeline,
    };
}

/// Re-export for public API
pub use error::{ShowcaseError, ShowcaseResult};

//! Copy-to-clipboard with transient "copied" feedback.
//!
//! [`ClipboardEcho`] writes text through a [`ClipboardBackend`] and, on
//! success, raises a per-key flag for [`COPIED_WINDOW_MS`]. Copying the same
//! key again restarts the window. Failures are logged and otherwise
//! swallowed: the flag simply never goes up.

#[cfg(feature = "clipboard")]
mod system;

use std::collections::HashMap;

use crate::engine::{ShowTime, TimerQueue};
use crate::error::ClipboardError;

#[cfg(feature = "clipboard")]
pub use system::SystemClipboard;

/// How long a key stays flagged after a successful copy.
pub const COPIED_WINDOW_MS: u64 = 2000;

/// Something that can receive text.
pub trait ClipboardBackend {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipboardError`] if the platform refuses or lacks a clipboard.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl<T: ClipboardBackend + ?Sized> ClipboardBackend for Box<T> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

/// In-process clipboard. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    failure: Option<ClipboardError>,
    writes: usize,
}

impl MemoryClipboard {
    /// Create an empty, working clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard whose writes always fail with `err`.
    #[must_use]
    pub fn failing(err: ClipboardError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    /// Last text written, if any.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Flag {
    copied: bool,
    generation: u64,
}

#[derive(Debug, Clone)]
struct ResetFlag {
    key: String,
    generation: u64,
}

/// Per-key "just copied" flags backed by a clipboard.
#[derive(Debug)]
pub struct ClipboardEcho<B> {
    backend: B,
    flags: HashMap<String, Flag>,
    resets: TimerQueue<ResetFlag>,
    window: ShowTime,
}

impl<B: ClipboardBackend> ClipboardEcho<B> {
    /// Create with the standard two-second window.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_window(backend, ShowTime::from_millis(COPIED_WINDOW_MS))
    }

    /// Create with a custom feedback window.
    #[must_use]
    pub fn with_window(backend: B, window: ShowTime) -> Self {
        Self {
            backend,
            flags: HashMap::new(),
            resets: TimerQueue::new(),
            window,
        }
    }

    /// Copy `text` and flag `key` on success. Returns whether the write worked.
    pub fn copy(&mut self, text: &str, key: &str, now: ShowTime) -> bool {
        let result = self.backend.write_text(text);
        self.record(key, result, now)
    }

    /// Apply the outcome of a write performed elsewhere.
    ///
    /// Hosts that own the clipboard call (e.g. a browser) report the result
    /// here so the flag logic stays in one place.
    pub fn record(&mut self, key: &str, result: Result<(), ClipboardError>, now: ShowTime) -> bool {
        match result {
            Ok(()) => {
                let flag = self.flags.entry(key.to_string()).or_default();
                flag.copied = true;
                flag.generation += 1;
                let generation = flag.generation;
                self.resets.schedule(
                    now + self.window,
                    ResetFlag {
                        key: key.to_string(),
                        generation,
                    },
                );
                tracing::debug!(key, at = %now, "copied to clipboard");
                true
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to copy text");
                false
            }
        }
    }

    /// Fire every reset due at `now`. Returns the keys whose flag went down.
    pub fn advance_to(&mut self, now: ShowTime) -> Vec<String> {
        let mut cleared = Vec::new();
        for timer in self.resets.drain_until(now) {
            let ResetFlag { key, generation } = timer.action;
            if let Some(flag) = self.flags.get_mut(&key) {
                // A later copy superseded this reset.
                if flag.generation == generation && flag.copied {
                    flag.copied = false;
                    cleared.push(key);
                }
            }
        }
        cleared
    }

    /// Whether `key` is currently flagged. Unknown keys are not.
    #[must_use]
    pub fn is_copied(&self, key: &str) -> bool {
        self.flags.get(key).is_some_and(|flag| flag.copied)
    }

    /// Snapshot of every key seen so far and its flag.
    #[must_use]
    pub fn flags(&self) -> HashMap<String, bool> {
        self.flags
            .iter()
            .map(|(key, flag)| (key.clone(), flag.copied))
            .collect()
    }

    /// When the next pending reset fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<ShowTime> {
        self.resets.next_deadline()
    }

    /// The backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}

//! Showcase TUI application state and logic.
//!
//! Owns one [`ShowClock`] that drives both the Sequencer and Clipboard Echo,
//! so a frame is a single `advance_to` on each.

use crossterm::event::KeyCode;

use crate::clipboard::{ClipboardBackend, ClipboardEcho, MemoryClipboard};
use crate::config::{CopyTarget, ShowcaseConfig};
use crate::engine::{ShowClock, ShowTime};
use crate::error::ShowcaseResult;
use crate::sequencer::{Phase, Sequencer};

/// Frame period of the TUI loop (about 30 FPS).
pub const FRAME_MS: u64 = 33;

/// Cursor blink half-period.
pub const CURSOR_BLINK_MS: u64 = 500;

/// Block cursor drawn after the typed prefix.
pub const CURSOR: char = '▌';

/// Application state for the showcase TUI.
pub struct ShowcaseApp {
    /// Demo player.
    pub sequencer: Sequencer,
    /// Copy feedback flags.
    pub clipboard: ClipboardEcho<Box<dyn ClipboardBackend>>,
    /// Loaded showcase.
    pub config: ShowcaseConfig,
    /// Show time.
    pub clock: ShowClock,
    /// Whether playback is stopped.
    pub paused: bool,
    /// Frame counter.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl ShowcaseApp {
    /// Create with the built-in showcase and the platform clipboard.
    ///
    /// # Errors
    ///
    /// Only if the embedded showcase is broken.
    pub fn new() -> ShowcaseResult<Self> {
        Self::from_config(ShowcaseConfig::embedded()?, default_backend())
    }

    /// Create from a configuration and clipboard backend. Playback starts
    /// immediately at time zero.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration cannot drive a sequencer.
    pub fn from_config(
        config: ShowcaseConfig,
        backend: Box<dyn ClipboardBackend>,
    ) -> ShowcaseResult<Self> {
        let mut sequencer = Sequencer::from_config(&config)?;
        sequencer.start(ShowTime::ZERO);

        Ok(Self {
            sequencer,
            clipboard: ClipboardEcho::new(backend),
            config,
            clock: ShowClock::from_millis(FRAME_MS),
            paused: false,
            frame_count: 0,
            should_quit: false,
        })
    }

    /// Advance by one fixed frame.
    pub fn update(&mut self) {
        let now = self.clock.tick();
        self.sync(now);
    }

    /// Advance to wall-clock `now`. Earlier times are ignored.
    pub fn update_to(&mut self, now: ShowTime) {
        let now = self.clock.set_time(now);
        self.sync(now);
    }

    fn sync(&mut self, now: ShowTime) {
        // Copy flags keep expiring while playback is stopped.
        self.sequencer.advance_to(now);
        self.clipboard.advance_to(now);
        self.frame_count += 1;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        let now = self.clock.now();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.sequencer.stop();
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.toggle_pause(),
            KeyCode::Char('r') => self.select(0),
            KeyCode::Left | KeyCode::Char('h') => {
                let count = self.sequencer.demos().len();
                let current = self.sequencer.state().active_demo;
                self.select((current + count - 1) % count);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let count = self.sequencer.demos().len();
                let current = self.sequencer.state().active_demo;
                self.select((current + 1) % count);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(target) = self.config.copy_targets.get(index) {
                    self.clipboard.copy(&target.text, &target.key, now);
                }
            }
            _ => {}
        }
    }

    fn toggle_pause(&mut self) {
        if self.paused {
            // Resuming replays the active demo from its first character.
            self.sequencer.start(self.clock.now());
        } else {
            self.sequencer.stop();
        }
        self.paused = !self.paused;
    }

    fn select(&mut self, index: usize) {
        if self.sequencer.select_demo(index, self.clock.now()).is_ok() {
            self.paused = false;
        }
    }

    /// Whether the blinking cursor is lit this frame.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        (self.clock.now().as_millis() / CURSOR_BLINK_MS) % 2 == 0
    }

    /// Lines of the fake terminal, cursor included while typing.
    #[must_use]
    pub fn terminal_lines(&self) -> Vec<String> {
        let state = self.sequencer.state();
        match state.phase {
            Phase::Typing => {
                let mut line = format!("{} {}", self.sequencer.prompt(), state.typed_prefix);
                if self.cursor_visible() {
                    line.push(CURSOR);
                }
                vec![line]
            }
            Phase::Executing => state.emitted_lines.clone(),
        }
    }

    /// Copy targets with their current flag.
    #[must_use]
    pub fn copy_targets(&self) -> Vec<(&CopyTarget, bool)> {
        self.config
            .copy_targets
            .iter()
            .map(|target| (target, self.clipboard.is_copied(&target.key)))
            .collect()
    }
}

#[cfg(feature = "clipboard")]
fn default_backend() -> Box<dyn ClipboardBackend> {
    Box::new(crate::clipboard::SystemClipboard::new())
}

#[cfg(not(feature = "clipboard"))]
fn default_backend() -> Box<dyn ClipboardBackend> {
    Box::new(MemoryClipboard::new())
}

/// In-memory app for headless use.
///
/// # Errors
///
/// Returns error if the configuration cannot drive a sequencer.
pub fn headless(config: ShowcaseConfig) -> ShowcaseResult<ShowcaseApp> {
    ShowcaseApp::from_config(config, Box::new(MemoryClipboard::new()))
}

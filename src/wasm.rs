//! WASM bindings for the showcase.
//!
//! The browser owns the clock and the clipboard: it calls [`ShowcaseWidget::tick`]
//! from `requestAnimationFrame` with `performance.now()` and reports the outcome
//! of `navigator.clipboard.writeText` through [`ShowcaseWidget::record_copy`].
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { ShowcaseWidget } from 'hexa_showcase';
//!
//! await init();
//! const widget = new ShowcaseWidget();
//! widget.start(performance.now());
//! function frame(now) {
//!     const snap = JSON.parse(widget.tick(now));
//!     render(snap.state, snap.copied);
//!     requestAnimationFrame(frame);
//! }
//! requestAnimationFrame(frame);
//! ```

// WASM-bindgen exports don't need #[must_use] - values returned to JS
#![allow(clippy::must_use_candidate)]

use std::collections::BTreeMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::clipboard::{ClipboardEcho, MemoryClipboard};
use crate::config::ShowcaseConfig;
use crate::engine::ShowTime;
use crate::error::{ClipboardError, ShowcaseError};
use crate::sequencer::{Sequencer, SequencerState};

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    now_ms: f64,
    running: bool,
    state: &'a SequencerState,
    copied: BTreeMap<String, bool>,
}

fn to_js(err: &ShowcaseError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn show_time(ms: f64) -> ShowTime {
    ShowTime::from_nanos((ms.max(0.0) * 1e6) as u64)
}

/// WASM-exported showcase state.
#[wasm_bindgen]
pub struct ShowcaseWidget {
    sequencer: Sequencer,
    clipboard: ClipboardEcho<MemoryClipboard>,
    now: ShowTime,
}

impl ShowcaseWidget {
    fn from_config(config: &ShowcaseConfig) -> Result<Self, ShowcaseError> {
        Ok(Self {
            sequencer: Sequencer::from_config(config)?,
            clipboard: ClipboardEcho::new(MemoryClipboard::new()),
            now: ShowTime::ZERO,
        })
    }

    fn snapshot(&self) -> String {
        let snapshot = Snapshot {
            now_ms: self.now.as_nanos() as f64 / 1e6,
            running: self.sequencer.is_running(),
            state: self.sequencer.state(),
            copied: self.clipboard.flags().into_iter().collect(),
        };
        serde_json::to_string(&snapshot).unwrap_or_default()
    }
}

#[wasm_bindgen]
impl ShowcaseWidget {
    /// Create a stopped widget with the built-in HEXA CLI demos.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ShowcaseWidget, JsValue> {
        let config = ShowcaseConfig::embedded().map_err(|e| to_js(&e))?;
        Self::from_config(&config).map_err(|e| to_js(&e))
    }

    /// Create a stopped widget from showcase YAML.
    #[wasm_bindgen]
    pub fn from_yaml(yaml: &str) -> Result<ShowcaseWidget, JsValue> {
        let config = ShowcaseConfig::from_yaml(yaml).map_err(|e| to_js(&e))?;
        Self::from_config(&config).map_err(|e| to_js(&e))
    }

    /// Start (or restart) the active demo at `now_ms`.
    #[wasm_bindgen]
    pub fn start(&mut self, now_ms: f64) {
        self.now = show_time(now_ms);
        self.sequencer.start(self.now);
    }

    /// Cancel all pending sequencer timers. Call on unmount.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        self.sequencer.stop();
    }

    /// Jump to demo `index`.
    #[wasm_bindgen]
    pub fn select_demo(&mut self, index: usize, now_ms: f64) -> Result<(), JsValue> {
        self.now = show_time(now_ms);
        self.sequencer
            .select_demo(index, self.now)
            .map_err(|e| to_js(&e))
    }

    /// Advance to `now_ms` and return a JSON snapshot of what to draw.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> String {
        let now = show_time(now_ms);
        if now > self.now {
            self.now = now;
        }
        self.sequencer.advance_to(self.now);
        self.clipboard.advance_to(self.now);
        self.snapshot()
    }

    /// Report the outcome of a browser clipboard write for `key`.
    #[wasm_bindgen]
    pub fn record_copy(&mut self, key: &str, ok: bool, now_ms: f64) -> bool {
        let result = if ok {
            Ok(())
        } else {
            Err(ClipboardError::Denied("browser rejected writeText".to_string()))
        };
        self.clipboard.record(key, result, show_time(now_ms))
    }

    /// Whether `key` shows "Copied!".
    #[wasm_bindgen]
    pub fn is_copied(&self, key: &str) -> bool {
        self.clipboard.is_copied(key)
    }

    /// Text currently typed at the prompt.
    #[wasm_bindgen(getter)]
    pub fn typed_prefix(&self) -> String {
        self.sequencer.state().typed_prefix.clone()
    }

    /// Index of the demo on screen.
    #[wasm_bindgen(getter)]
    pub fn active_demo(&self) -> usize {
        self.sequencer.state().active_demo
    }

    /// Number of demos.
    #[wasm_bindgen(getter)]
    pub fn num_demos(&self) -> usize {
        self.sequencer.demos().len()
    }

    /// Milliseconds of the next scheduled change, if any.
    #[wasm_bindgen]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        [self.sequencer.next_deadline(), self.clipboard.next_deadline()]
            .into_iter()
            .flatten()
            .min()
            .map(|t| t.as_nanos() as f64 / 1e6)
    }
}

/// Initialize WASM module.
/// Called automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

//! Headless playback to a line-oriented writer.
//!
//! One loop owns the sequencer: it sleeps until the next deadline, fires
//! what is due and writes the difference to the output. Typing is drawn by
//! rewriting the current line with a carriage return.

use std::io::Write;

use tokio::time::Instant;

use crate::engine::ShowTime;
use crate::error::ShowcaseResult;
use crate::sequencer::{Phase, Sequencer, SequencerState};

/// Plays a sequencer in real time.
#[derive(Debug)]
pub struct Player<W> {
    sequencer: Sequencer,
    out: W,
    shown: SequencerState,
}

impl<W: Write> Player<W> {
    /// Wrap a (stopped) sequencer.
    pub fn new(sequencer: Sequencer, out: W) -> Self {
        Self {
            sequencer,
            out,
            shown: SequencerState::default(),
        }
    }

    /// Play until `cycles` demos have finished, or forever with `None`.
    ///
    /// The sequencer is stopped before returning, so no timers outlive the call.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the writer fails.
    pub async fn play(&mut self, cycles: Option<u64>) -> ShowcaseResult<()> {
        let epoch = Instant::now();
        let target = cycles.map(|n| self.sequencer.cycles_completed() + n);
        self.sequencer.start(ShowTime::ZERO);
        self.shown = SequencerState::default();

        let result = match self.draw_prompt() {
            Ok(()) => self.drive(epoch, target).await,
            Err(e) => Err(e),
        };
        self.sequencer.stop();
        result
    }

    fn draw_prompt(&mut self) -> ShowcaseResult<()> {
        let start = self.sequencer.state().clone();
        let text = render_diff(&self.shown, &start, self.sequencer.prompt());
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        self.shown = start;
        Ok(())
    }

    async fn drive(&mut self, epoch: Instant, target: Option<u64>) -> ShowcaseResult<()> {
        while let Some(deadline) = self.sequencer.next_deadline() {
            if target.is_some_and(|t| self.sequencer.cycles_completed() >= t) {
                break;
            }
            tokio::time::sleep_until(epoch + deadline.as_duration()).await;

            for change in self.sequencer.advance_to(deadline) {
                let text = render_diff(&self.shown, &change, self.sequencer.prompt());
                self.out.write_all(text.as_bytes())?;
                self.shown = change;
            }
            self.out.flush()?;
        }
        Ok(())
    }

    /// The sequencer being played.
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Text that turns the terminal showing `prev` into one showing `next`.
#[must_use]
pub fn render_diff(prev: &SequencerState, next: &SequencerState, prompt: &str) -> String {
    let new_cycle = next.emitted_lines.is_empty()
        && next.phase == Phase::Typing
        && (prev.active_demo != next.active_demo || !prev.emitted_lines.is_empty());
    let mut text = String::new();
    if new_cycle {
        text.push('\n');
    }

    if next.emitted_lines.len() > prev.emitted_lines.len() {
        let already = if new_cycle { 0 } else { prev.emitted_lines.len() };
        for (i, line) in next.emitted_lines.iter().enumerate().skip(already) {
            // The echoed command replaces the line being typed.
            if i == 0 {
                text.push('\r');
            }
            text.push_str(line);
            text.push('\n');
        }
    } else if next.phase == Phase::Typing {
        text.push('\r');
        text.push_str(prompt);
        text.push(' ');
        text.push_str(&next.typed_prefix);
    }
    text
}

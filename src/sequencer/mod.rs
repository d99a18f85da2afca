//! Terminal demo sequencer.
//!
//! Plays a fixed, looping list of [`CommandDemo`]s the way the HEXA CLI
//! landing page does: the command is typed one character at a time, the
//! prompt line is echoed, output lines appear one by one, then the next demo
//! takes over.
//!
//! Each cycle is scheduled up front as a batch of timers on one
//! [`TimerQueue`]. Switching demos clears that queue before the next batch
//! is scheduled, so at most one cycle's timers are ever pending.
//!
//! ```rust
//! use hexa_showcase::engine::ShowTime;
//! use hexa_showcase::sequencer::{CommandDemo, Phase, Sequencer, SequencerTiming};
//!
//! let demos = vec![CommandDemo::new("a", ["x"])];
//! let mut seq = Sequencer::new(demos, SequencerTiming::default(), "$").unwrap();
//! seq.start(ShowTime::ZERO);
//!
//! seq.advance_to(ShowTime::from_millis(550));
//! assert_eq!(seq.state().phase, Phase::Executing);
//! assert_eq!(seq.state().emitted_lines, vec!["$ a".to_string()]);
//! ```

pub mod timeline;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::ShowcaseConfig;
use crate::engine::{ShowTime, TimerQueue};
use crate::error::{ShowcaseError, ShowcaseResult};

pub use timeline::{Timeline, TimelineEntry};

/// One scripted command and the output it pretends to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CommandDemo {
    /// Literal characters to type.
    #[validate(length(max = 512))]
    pub command: String,
    /// Lines shown after the command is "run".
    #[serde(default)]
    pub outputs: Vec<String>,
}

impl CommandDemo {
    /// Create a demo.
    #[must_use]
    pub fn new<I, S>(command: impl Into<String>, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Command length in characters (not bytes).
    #[must_use]
    pub fn command_len(&self) -> usize {
        self.command.chars().count()
    }
}

/// Sub-state of a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The command is being typed.
    #[default]
    Typing,
    /// The command line has been echoed; output is appearing.
    Executing,
}

/// Delays that shape a cycle, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields, default)]
pub struct SequencerTiming {
    /// Between typed characters.
    #[validate(range(max = 10_000))]
    pub char_delay_ms: u64,
    /// After the last character, before the command line is echoed.
    #[validate(range(max = 60_000))]
    pub command_pause_ms: u64,
    /// Between the echoed command line and the first output line.
    #[validate(range(max = 60_000))]
    pub output_lead_ms: u64,
    /// Between consecutive output lines.
    #[validate(range(max = 60_000))]
    pub output_delay_ms: u64,
    /// After the last output line, before the next demo. Must be non-zero.
    #[validate(range(min = 1, max = 600_000))]
    pub cycle_pause_ms: u64,
}

impl Default for SequencerTiming {
    fn default() -> Self {
        Self {
            char_delay_ms: 50,
            command_pause_ms: 500,
            output_lead_ms: 500,
            output_delay_ms: 800,
            cycle_pause_ms: 2000,
        }
    }
}

impl SequencerTiming {
    /// Offset from cycle start at which `chars` characters are shown.
    #[must_use]
    pub const fn typing_offset(&self, chars: usize) -> u64 {
        (chars as u64).saturating_mul(self.char_delay_ms)
    }

    /// Offset from cycle start at which the command line is echoed.
    #[must_use]
    pub fn echo_offset(&self, demo: &CommandDemo) -> u64 {
        self.typing_offset(demo.command_len())
            .saturating_add(self.command_pause_ms)
    }

    /// Offset from cycle start at which output line `line` is appended.
    #[must_use]
    pub fn output_offset(&self, demo: &CommandDemo, line: usize) -> u64 {
        self.echo_offset(demo)
            .saturating_add(self.output_lead_ms)
            .saturating_add((line as u64).saturating_mul(self.output_delay_ms))
    }

    /// Full length of a cycle for `demo`; the next demo starts at this offset.
    #[must_use]
    pub fn cycle_duration(&self, demo: &CommandDemo) -> u64 {
        self.output_offset(demo, demo.outputs.len())
            .saturating_add(self.cycle_pause_ms)
    }
}

/// Everything a renderer needs to draw the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerState {
    /// Index of the demo being played.
    pub active_demo: usize,
    /// Characters of the command typed so far (Typing phase only).
    pub typed_prefix: String,
    /// Echoed command line followed by the output lines shown so far.
    pub emitted_lines: Vec<String>,
    /// Current phase.
    pub phase: Phase,
    /// Output lines shown so far in this cycle.
    pub execution_step: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequencerAction {
    Type { chars: usize },
    Echo,
    Emit { line: usize },
    Advance,
}

/// Looping command-demo player.
#[derive(Debug)]
pub struct Sequencer {
    demos: Vec<CommandDemo>,
    timing: SequencerTiming,
    prompt: String,
    state: SequencerState,
    timers: TimerQueue<SequencerAction>,
    running: bool,
    cycles_completed: u64,
    cycle_started_at: ShowTime,
}

impl Sequencer {
    /// Create a stopped sequencer positioned on the first demo.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `demos` is empty, or a validation
    /// error if the timing or a demo is out of range (a zero cycle pause
    /// included).
    pub fn new(
        demos: Vec<CommandDemo>,
        timing: SequencerTiming,
        prompt: impl Into<String>,
    ) -> ShowcaseResult<Self> {
        if demos.is_empty() {
            return Err(ShowcaseError::config("sequencer needs at least one demo"));
        }
        timing.validate()?;
        for demo in &demos {
            demo.validate()?;
        }

        Ok(Self {
            demos,
            timing,
            prompt: prompt.into(),
            state: SequencerState::default(),
            timers: TimerQueue::new(),
            running: false,
            cycles_completed: 0,
            cycle_started_at: ShowTime::ZERO,
        })
    }

    /// Create a stopped sequencer from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Sequencer::new`].
    pub fn from_config(config: &ShowcaseConfig) -> ShowcaseResult<Self> {
        Self::new(config.demos.clone(), config.timing, config.prompt.clone())
    }

    /// Start playing the active demo from its first character.
    ///
    /// Calling this while running restarts the active demo.
    pub fn start(&mut self, now: ShowTime) {
        self.running = true;
        self.begin_cycle(now);
    }

    /// Cancel every pending timer and freeze the current state.
    pub fn stop(&mut self) {
        self.timers.clear();
        self.running = false;
    }

    /// Jump to demo `index`, cancelling the current cycle.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `index` is out of range.
    pub fn select_demo(&mut self, index: usize, now: ShowTime) -> ShowcaseResult<()> {
        if index >= self.demos.len() {
            return Err(ShowcaseError::config(format!(
                "demo index {index} out of range (have {})",
                self.demos.len()
            )));
        }
        self.state.active_demo = index;
        self.running = true;
        self.begin_cycle(now);
        Ok(())
    }

    /// Fire every timer due at `now`, in schedule order.
    ///
    /// Returns one snapshot per observable state change; timers that leave
    /// the state as it was produce none. When a cycle ends inside the
    /// window, the next cycle is anchored at the old cycle's end rather than
    /// at `now`, so late calls catch up without drifting.
    pub fn advance_to(&mut self, now: ShowTime) -> Vec<SequencerState> {
        let mut changes = Vec::new();
        if !self.running {
            return changes;
        }

        while let Some(timer) = self.timers.pop_due(now) {
            tracing::trace!(deadline = %timer.deadline, action = ?timer.action, "timer fired");
            let before = self.state.clone();
            self.apply(timer.action, timer.deadline);
            // Type { chars: 0 } at a cycle start repeats what begin_cycle set.
            if self.state != before {
                changes.push(self.state.clone());
            }
        }
        changes
    }

    fn apply(&mut self, action: SequencerAction, deadline: ShowTime) {
        let demo = &self.demos[self.state.active_demo];
        match action {
            SequencerAction::Type { chars } => {
                self.state.typed_prefix = demo.command.chars().take(chars).collect();
            }
            SequencerAction::Echo => {
                let line = format!("{} {}", self.prompt, demo.command);
                self.state.phase = Phase::Executing;
                self.state.typed_prefix.clear();
                self.state.emitted_lines.push(line);
            }
            SequencerAction::Emit { line } => {
                if let Some(output) = demo.outputs.get(line) {
                    self.state.emitted_lines.push(output.clone());
                    self.state.execution_step = line + 1;
                }
            }
            SequencerAction::Advance => {
                self.cycles_completed += 1;
                self.state.active_demo = (self.state.active_demo + 1) % self.demos.len();
                tracing::debug!(
                    demo = self.state.active_demo,
                    cycles = self.cycles_completed,
                    at = %deadline,
                    "advancing to next demo"
                );
                self.begin_cycle(deadline);
            }
        }
    }

    fn begin_cycle(&mut self, at: ShowTime) {
        self.timers.clear();

        self.state.typed_prefix.clear();
        self.state.emitted_lines.clear();
        self.state.phase = Phase::Typing;
        self.state.execution_step = 0;
        self.cycle_started_at = at;

        let timing = self.timing;
        let demo = &self.demos[self.state.active_demo];
        for chars in 0..=demo.command_len() {
            self.timers.schedule(
                at.add_millis(timing.typing_offset(chars)),
                SequencerAction::Type { chars },
            );
        }
        self.timers
            .schedule(at.add_millis(timing.echo_offset(demo)), SequencerAction::Echo);
        for line in 0..demo.outputs.len() {
            self.timers.schedule(
                at.add_millis(timing.output_offset(demo, line)),
                SequencerAction::Emit { line },
            );
        }
        self.timers.schedule(
            at.add_millis(timing.cycle_duration(demo)),
            SequencerAction::Advance,
        );
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Demo being played.
    #[must_use]
    pub fn active_demo(&self) -> &CommandDemo {
        &self.demos[self.state.active_demo]
    }

    /// All demos, in play order.
    #[must_use]
    pub fn demos(&self) -> &[CommandDemo] {
        &self.demos
    }

    /// Timing in use.
    #[must_use]
    pub const fn timing(&self) -> &SequencerTiming {
        &self.timing
    }

    /// Prompt prefix used for echoed command lines.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether timers are live.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Number of demo switches caused by cycles ending.
    #[must_use]
    pub const fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    /// When the current cycle began.
    #[must_use]
    pub const fn cycle_started_at(&self) -> ShowTime {
        self.cycle_started_at
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// When the next timer fires, if running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<ShowTime> {
        if self.running {
            self.timers.next_deadline()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> ShowTime {
        ShowTime::from_millis(millis)
    }

    fn scenario() -> Sequencer {
        let demos = vec![
            CommandDemo::new("a", ["x"]),
            CommandDemo::new("bb", Vec::<String>::new()),
        ];
        let mut seq = match Sequencer::new(demos, SequencerTiming::default(), "$") {
            Ok(seq) => seq,
            Err(e) => panic!("scenario sequencer: {e}"),
        };
        seq.start(ms(0));
        seq
    }

    #[test]
    fn test_rejects_empty_demo_list() {
        let result = Sequencer::new(Vec::new(), SequencerTiming::default(), "$");
        assert!(matches!(result, Err(ShowcaseError::Config { .. })));
    }

    #[test]
    fn test_rejects_zero_cycle_pause() {
        let timing = SequencerTiming {
            cycle_pause_ms: 0,
            ..SequencerTiming::default()
        };
        let result = Sequencer::new(vec![CommandDemo::new("a", ["x"])], timing, "$");
        assert!(result.is_err());
    }

    #[test]
    fn test_new_sequencer_is_stopped() {
        let seq = Sequencer::new(
            vec![CommandDemo::new("a", ["x"])],
            SequencerTiming::default(),
            "$",
        )
        .expect("valid");
        assert!(!seq.is_running());
        assert_eq!(seq.next_deadline(), None);
        assert_eq!(seq.state(), &SequencerState::default());
    }

    #[test]
    fn test_scenario_timeline() {
        let mut seq = scenario();

        seq.advance_to(ms(0));
        assert_eq!(seq.state().typed_prefix, "");
        assert_eq!(seq.state().phase, Phase::Typing);

        seq.advance_to(ms(50));
        assert_eq!(seq.state().typed_prefix, "a");

        seq.advance_to(ms(549));
        assert!(seq.state().emitted_lines.is_empty());

        seq.advance_to(ms(550));
        assert_eq!(seq.state().phase, Phase::Executing);
        assert_eq!(seq.state().typed_prefix, "");
        assert_eq!(seq.state().emitted_lines, vec!["$ a"]);

        seq.advance_to(ms(1050));
        assert_eq!(seq.state().emitted_lines, vec!["$ a", "x"]);
        assert_eq!(seq.state().execution_step, 1);

        seq.advance_to(ms(3849));
        assert_eq!(seq.state().active_demo, 0);

        seq.advance_to(ms(3850));
        assert_eq!(seq.state().active_demo, 1);
        assert!(seq.state().emitted_lines.is_empty());
        assert_eq!(seq.state().phase, Phase::Typing);
        assert_eq!(seq.cycles_completed(), 1);
        assert_eq!(seq.cycle_started_at(), ms(3850));
    }

    #[test]
    fn test_empty_outputs_collapse_cycle() {
        let demo = CommandDemo::new("", Vec::<String>::new());
        let timing = SequencerTiming::default();
        assert_eq!(timing.cycle_duration(&demo), 500 + 500 + 2000);
    }

    #[test]
    fn test_cycle_duration_formula() {
        let timing = SequencerTiming::default();
        let demo = CommandDemo::new("hexa-cli init --ai-powered", ["1", "2", "3", "4"]);
        let n = demo.command_len() as u64;
        assert_eq!(timing.echo_offset(&demo), n * 50 + 500);
        assert_eq!(timing.output_offset(&demo, 2), n * 50 + 1000 + 1600);
        assert_eq!(timing.cycle_duration(&demo), n * 50 + 1000 + 3200 + 2000);
    }

    #[test]
    fn test_typing_counts_chars_not_bytes() {
        let demo = CommandDemo::new("héxa", ["ok"]);
        assert_eq!(demo.command_len(), 4);

        let mut seq = Sequencer::new(vec![demo], SequencerTiming::default(), "$").expect("valid");
        seq.start(ms(0));
        seq.advance_to(ms(100));
        assert_eq!(seq.state().typed_prefix, "hé");
    }

    #[test]
    fn test_one_snapshot_per_observable_change() {
        let mut seq = scenario();
        // empty prompt at t=0 is already the state after start
        assert!(seq.advance_to(ms(0)).is_empty());

        // 1 typing step, echo, 1 output
        let changes = seq.advance_to(ms(1050));
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].typed_prefix, "a");
        assert_eq!(changes[2].emitted_lines.len(), 2);
    }

    #[test]
    fn test_demo_switch_emits_single_snapshot() {
        let mut seq = scenario();
        seq.advance_to(ms(3849));

        let changes = seq.advance_to(ms(3850));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].active_demo, 1);
        assert!(changes[0].emitted_lines.is_empty());
    }

    #[test]
    fn test_no_consecutive_duplicate_snapshots() {
        let mut seq = scenario();
        let changes = seq.advance_to(ms(3 * 3850));
        assert!(!changes.is_empty());
        for pair in changes.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_rejects_out_of_range_timing() {
        let timing = SequencerTiming {
            char_delay_ms: u64::MAX / 2,
            ..SequencerTiming::default()
        };
        let result = Sequencer::new(vec![CommandDemo::new("abc", ["x"])], timing, "$");
        assert!(matches!(result, Err(ShowcaseError::Validation(_))));

        let timing = SequencerTiming {
            cycle_pause_ms: u64::MAX,
            ..SequencerTiming::default()
        };
        let result = Sequencer::new(vec![CommandDemo::new("abc", ["x"])], timing, "$");
        assert!(matches!(result, Err(ShowcaseError::Validation(_))));
    }

    #[test]
    fn test_offsets_saturate_instead_of_overflowing() {
        let timing = SequencerTiming {
            char_delay_ms: u64::MAX / 2,
            cycle_pause_ms: u64::MAX,
            ..SequencerTiming::default()
        };
        let demo = CommandDemo::new("abc", ["x"]);
        assert_eq!(timing.typing_offset(3), u64::MAX);
        assert_eq!(timing.output_offset(&demo, 0), u64::MAX);
        assert_eq!(timing.cycle_duration(&demo), u64::MAX);
    }

    #[test]
    fn test_rejects_overlong_command() {
        let demo = CommandDemo::new("a".repeat(513), Vec::<String>::new());
        let result = Sequencer::new(vec![demo], SequencerTiming::default(), "$");
        assert!(matches!(result, Err(ShowcaseError::Validation(_))));
    }

    #[test]
    fn test_at_most_one_cycle_pending() {
        let mut seq = scenario();
        // typing 0..=1, echo, 1 output, advance
        assert_eq!(seq.pending_timers(), 5);

        seq.advance_to(ms(3850));
        // demo 1: typing 0..=2, echo, advance
        assert_eq!(seq.pending_timers(), 5 - 1);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut seq = scenario();
        seq.advance_to(ms(50));
        seq.stop();

        assert_eq!(seq.pending_timers(), 0);
        assert!(seq.advance_to(ms(10_000)).is_empty());
        assert_eq!(seq.state().typed_prefix, "a");
    }

    #[test]
    fn test_start_after_stop_restarts_demo() {
        let mut seq = scenario();
        seq.advance_to(ms(1050));
        seq.stop();

        seq.start(ms(5000));
        assert!(seq.state().emitted_lines.is_empty());
        assert_eq!(seq.state().active_demo, 0);

        seq.advance_to(ms(5550));
        assert_eq!(seq.state().emitted_lines, vec!["$ a"]);
    }

    #[test]
    fn test_select_demo_discards_old_cycle() {
        let mut seq = scenario();
        seq.advance_to(ms(600));
        assert_eq!(seq.state().emitted_lines, vec!["$ a"]);

        seq.select_demo(1, ms(600)).expect("in range");
        seq.advance_to(ms(1050));
        // "x" from demo 0 must never appear
        assert!(seq.state().emitted_lines.is_empty());
        assert_eq!(seq.state().typed_prefix, "bb");

        assert!(seq.select_demo(2, ms(600)).is_err());
    }

    #[test]
    fn test_late_tick_catches_up_without_drift() {
        let mut seq = scenario();
        // one call far past the first cycle's end
        seq.advance_to(ms(3850 + 150));
        assert_eq!(seq.state().active_demo, 1);
        assert_eq!(seq.cycle_started_at(), ms(3850));
        assert_eq!(seq.state().typed_prefix, "bb");
    }

    #[test]
    fn test_loops_back_to_first_demo() {
        let mut seq = scenario();
        let demo1 = CommandDemo::new("bb", Vec::<String>::new());
        let end1 = 3850 + SequencerTiming::default().cycle_duration(&demo1);

        seq.advance_to(ms(end1));
        assert_eq!(seq.state().active_demo, 0);
        assert_eq!(seq.cycles_completed(), 2);
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        let json = serde_json::to_string(&Phase::Executing).expect("serialize");
        assert_eq!(json, "\"executing\"");
    }
}

//! Offline recording of a sequencer run.
//!
//! Jumps the sequencer from deadline to deadline instead of sampling a
//! clock, so a recording contains every state change exactly once.

use serde::{Deserialize, Serialize};

use crate::engine::ShowTime;
use crate::error::ShowcaseResult;
use crate::sequencer::{Sequencer, SequencerState};

/// A state change and when it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Time of the change.
    pub at: ShowTime,
    /// State right after the change.
    pub state: SequencerState,
}

/// Ordered list of state changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    cycle_starts: Vec<ShowTime>,
}

impl Timeline {
    /// Start `sequencer` at `start` and record until `cycles` demos have
    /// finished. The first entry is the state at `start`; the first state of
    /// the following cycle is included.
    pub fn record_cycles(sequencer: &mut Sequencer, start: ShowTime, cycles: u64) -> Self {
        let target = sequencer.cycles_completed() + cycles;
        sequencer.start(start);
        let state = sequencer.state().clone();
        let mut timeline = Self::record_while(sequencer, |seq, _| seq.cycles_completed() < target);
        timeline.prepend(start, state);
        timeline
    }

    /// Start `sequencer` at `start` and record every change up to `end`.
    pub fn record_until(sequencer: &mut Sequencer, start: ShowTime, end: ShowTime) -> Self {
        sequencer.start(start);
        let state = sequencer.state().clone();
        let mut timeline = Self::record_while(sequencer, |_, deadline| deadline <= end);
        timeline.prepend(start, state);
        timeline
    }

    fn prepend(&mut self, start: ShowTime, state: SequencerState) {
        self.entries.insert(0, TimelineEntry { at: start, state });
        if self.cycle_starts.first() != Some(&start) {
            self.cycle_starts.insert(0, start);
        }
    }

    fn record_while(
        sequencer: &mut Sequencer,
        mut keep_going: impl FnMut(&Sequencer, ShowTime) -> bool,
    ) -> Self {
        let mut entries = Vec::new();
        let mut cycle_starts = Vec::new();
        while let Some(deadline) = sequencer.next_deadline() {
            if !keep_going(sequencer, deadline) {
                break;
            }
            if cycle_starts.last() != Some(&sequencer.cycle_started_at()) {
                cycle_starts.push(sequencer.cycle_started_at());
            }
            for state in sequencer.advance_to(deadline) {
                entries.push(TimelineEntry {
                    at: deadline,
                    state,
                });
            }
            if cycle_starts.last() != Some(&sequencer.cycle_started_at()) {
                cycle_starts.push(sequencer.cycle_started_at());
            }
        }
        Self {
            entries,
            cycle_starts,
        }
    }

    /// Recorded changes in order.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Number of recorded changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State visible at time `at`: the last change at or before it.
    #[must_use]
    pub fn state_at(&self, at: ShowTime) -> Option<&SequencerState> {
        let idx = self.entries.partition_point(|entry| entry.at <= at);
        idx.checked_sub(1).map(|i| &self.entries[i].state)
    }

    /// Times at which a cycle began during the recording.
    #[must_use]
    pub fn cycle_starts(&self) -> &[ShowTime] {
        &self.cycle_starts
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> ShowcaseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::{CommandDemo, Phase, SequencerTiming};

    fn ms(millis: u64) -> ShowTime {
        ShowTime::from_millis(millis)
    }

    fn scenario() -> Sequencer {
        Sequencer::new(
            vec![
                CommandDemo::new("a", ["x"]),
                CommandDemo::new("bb", Vec::<String>::new()),
            ],
            SequencerTiming::default(),
            "$",
        )
        .expect("valid scenario")
    }

    #[test]
    fn test_record_one_cycle() {
        let mut seq = scenario();
        let timeline = Timeline::record_cycles(&mut seq, ShowTime::ZERO, 1);

        // start, Type 1, Echo, Emit 0, Advance
        assert_eq!(timeline.len(), 5);
        assert_eq!(timeline.entries()[0].at, ms(0));
        assert_eq!(timeline.entries()[0].state, SequencerState::default());
        let last = &timeline.entries()[4];
        assert_eq!(last.at, ms(3850));
        assert_eq!(last.state.active_demo, 1);
        assert!(last.state.emitted_lines.is_empty());
    }

    #[test]
    fn test_entries_are_distinct_changes() {
        let mut seq = scenario();
        let timeline = Timeline::record_cycles(&mut seq, ShowTime::ZERO, 4);
        for pair in timeline.entries().windows(2) {
            assert_ne!(pair[0].state, pair[1].state, "duplicate at {}", pair[1].at);
        }
    }

    #[test]
    fn test_record_until_before_first_change() {
        let mut seq = scenario();
        let timeline = Timeline::record_until(&mut seq, ms(100), ms(120));
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.cycle_starts(), &[ms(100)]);
    }

    #[test]
    fn test_state_at_samples() {
        let mut seq = scenario();
        let timeline = Timeline::record_cycles(&mut seq, ShowTime::ZERO, 2);

        let at = |t| timeline.state_at(ms(t)).cloned().unwrap_or_default();
        assert_eq!(at(50).typed_prefix, "a");
        assert_eq!(at(549).phase, Phase::Typing);
        assert_eq!(at(550).emitted_lines, vec!["$ a"]);
        assert_eq!(at(1050).emitted_lines, vec!["$ a", "x"]);
        assert_eq!(at(3850).active_demo, 1);
    }

    #[test]
    fn test_cycle_starts() {
        let mut seq = scenario();
        let timeline = Timeline::record_cycles(&mut seq, ShowTime::ZERO, 2);
        // demo 1 lasts 2*50 + 500 + 500 + 2000
        assert_eq!(timeline.cycle_starts(), &[ms(0), ms(3850), ms(3850 + 3100)]);
    }

    #[test]
    fn test_cycle_starts_single_demo() {
        let mut seq = Sequencer::new(
            vec![CommandDemo::new("", Vec::<String>::new())],
            SequencerTiming::default(),
            "$",
        )
        .expect("valid");
        let timeline = Timeline::record_cycles(&mut seq, ShowTime::ZERO, 2);
        assert_eq!(timeline.cycle_starts(), &[ms(0), ms(3000), ms(6000)]);
    }

    #[test]
    fn test_record_until() {
        let mut seq = scenario();
        let timeline = Timeline::record_until(&mut seq, ShowTime::ZERO, ms(600));
        assert_eq!(timeline.len(), 3);
        assert!(timeline.entries().iter().all(|e| e.at <= ms(600)));
    }

    #[test]
    fn test_state_at_before_start() {
        let mut seq = scenario();
        let timeline = Timeline::record_until(&mut seq, ms(100), ms(200));
        assert!(timeline.state_at(ms(50)).is_none());
    }

    #[test]
    fn test_stopped_sequencer_records_nothing_after_stop() {
        let mut seq = scenario();
        seq.start(ShowTime::ZERO);
        seq.stop();
        let timeline = Timeline::record_while(&mut seq, |_, _| true);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_to_json() {
        let mut seq = scenario();
        let timeline = Timeline::record_until(&mut seq, ShowTime::ZERO, ms(550));
        let json = timeline.to_json().expect("serialize");
        assert!(json.contains("\"typed_prefix\": \"a\""));
        assert!(json.contains("\"phase\": \"executing\""));
    }
}

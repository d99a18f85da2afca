//! Sequencer timing tests against the public API.
//!
//! Each test states the property it would falsify if the sequencer drifted,
//! leaked timers across a cycle switch, or lost determinism.

use hexa_showcase::prelude::*;

fn ms(millis: u64) -> ShowTime {
    ShowTime::from_millis(millis)
}

fn two_demo_sequencer() -> Sequencer {
    Sequencer::new(
        vec![
            CommandDemo::new("a", ["x"]),
            CommandDemo::new("bb", Vec::<String>::new()),
        ],
        SequencerTiming::default(),
        "$",
    )
    .expect("valid sequencer")
}

/// Two-demo walkthrough: type, echo, output, then switch.
#[test]
fn two_demo_walkthrough() {
    let mut seq = two_demo_sequencer();
    seq.start(ms(0));

    seq.advance_to(ms(50));
    assert_eq!(seq.state().typed_prefix, "a");
    assert_eq!(seq.state().phase, Phase::Typing);

    seq.advance_to(ms(550));
    assert_eq!(seq.state().emitted_lines, vec!["$ a"]);
    assert_eq!(seq.state().phase, Phase::Executing);

    seq.advance_to(ms(1050));
    assert_eq!(seq.state().emitted_lines, vec!["$ a", "x"]);

    // 50 typing + 500 pause + 500 lead + 800 line + 2000 hold
    seq.advance_to(ms(3849));
    assert_eq!(seq.state().active_demo, 0);
    seq.advance_to(ms(3850));
    assert_eq!(seq.state().active_demo, 1);
    assert!(seq.state().emitted_lines.is_empty());
    assert_eq!(seq.state().phase, Phase::Typing);
}

/// A demo with no outputs lasts typing + pause + lead + hold.
#[test]
fn empty_outputs_collapse_cycle() {
    let timing = SequencerTiming::default();
    let demo = CommandDemo::new("bb", Vec::<String>::new());
    assert_eq!(timing.cycle_duration(&demo), 100 + 500 + 500 + 2000);

    let mut seq = two_demo_sequencer();
    seq.select_demo(1, ms(0)).expect("in range");
    seq.advance_to(ms(3099));
    assert_eq!(seq.state().active_demo, 1);
    seq.advance_to(ms(3100));
    assert_eq!(seq.state().active_demo, 0);
}

/// An empty command echoes straight after the pause.
#[test]
fn empty_command_is_valid() {
    let mut seq = Sequencer::new(
        vec![CommandDemo::new("", ["only output"])],
        SequencerTiming::default(),
        "$",
    )
    .expect("valid");
    seq.start(ms(0));
    seq.advance_to(ms(500));
    assert_eq!(seq.state().emitted_lines, vec!["$ "]);
    seq.advance_to(ms(1000));
    assert_eq!(seq.state().emitted_lines, vec!["$ ", "only output"]);
}

/// Every prefix of every embedded command appears at i * 50ms.
#[test]
fn embedded_prefixes_at_char_delay() {
    let config = ShowcaseConfig::embedded().expect("embedded");
    for (index, demo) in config.demos.iter().enumerate() {
        let mut seq = Sequencer::from_config(&config).expect("valid");
        seq.select_demo(index, ms(0)).expect("in range");
        for (i, _) in demo.command.char_indices().chain([(demo.command.len(), ' ')]) {
            let chars = demo.command[..i].chars().count() as u64;
            seq.advance_to(ms(chars * 50));
            assert_eq!(seq.state().typed_prefix, &demo.command[..i]);
        }
    }
}

/// Lines never mix across demos, however coarse the polling.
#[test]
fn coarse_polling_never_interleaves() {
    let config = ShowcaseConfig::embedded().expect("embedded");
    for step in [1u64, 7, 333, 2000, 9000] {
        let mut seq = Sequencer::from_config(&config).expect("valid");
        seq.start(ms(0));
        let mut now = 0;
        while seq.cycles_completed() < 8 {
            now += step;
            for state in seq.advance_to(ms(now)) {
                let demo = &config.demos[state.active_demo];
                if let Some((echo, outputs)) = state.emitted_lines.split_first() {
                    assert_eq!(echo, &format!("{} {}", config.prompt, demo.command));
                    assert_eq!(outputs, &demo.outputs[..outputs.len()]);
                }
            }
        }
    }
}

/// After N cycles the sequencer looks exactly like it did at start.
#[test]
fn full_loop_is_idempotent() {
    let config = ShowcaseConfig::embedded().expect("embedded");
    let mut seq = Sequencer::from_config(&config).expect("valid");
    seq.start(ms(0));
    let initial = seq.state().clone();

    let first = Timeline::record_cycles(&mut seq, ms(0), config.demos.len() as u64);
    let loop_end = *first.cycle_starts().last().expect("cycle starts");
    assert_eq!(seq.state().active_demo, initial.active_demo);
    assert!(seq.state().emitted_lines.is_empty());

    let mut replay = Sequencer::from_config(&config).expect("valid");
    let second = Timeline::record_cycles(&mut replay, loop_end, config.demos.len() as u64);
    let shifted: Vec<_> = second
        .entries()
        .iter()
        .map(|e| (e.at - loop_end, e.state.clone()))
        .collect();
    let original: Vec<_> = first
        .entries()
        .iter()
        .map(|e| (e.at, e.state.clone()))
        .collect();
    assert_eq!(shifted, original);
}

/// Same configuration, same timeline, bit for bit.
#[test]
fn timelines_are_reproducible() {
    let config = ShowcaseConfig::embedded().expect("embedded");
    let record = || {
        let mut seq = Sequencer::from_config(&config).expect("valid");
        Timeline::record_cycles(&mut seq, ms(0), 12)
            .to_json()
            .expect("json")
    };
    assert_eq!(record(), record());
}

/// Stop leaves nothing scheduled; start replays the active demo.
#[test]
fn stop_then_start_restarts_active_demo() {
    let mut seq = two_demo_sequencer();
    seq.start(ms(0));
    seq.advance_to(ms(600));
    seq.stop();
    assert_eq!(seq.pending_timers(), 0);
    assert!(seq.advance_to(ms(60_000)).is_empty());

    seq.start(ms(60_000));
    assert_eq!(seq.state().active_demo, 0);
    assert!(seq.state().emitted_lines.is_empty());
    seq.advance_to(ms(60_050));
    assert_eq!(seq.state().typed_prefix, "a");
}

#[test]
fn empty_demo_list_rejected() {
    let result = Sequencer::new(Vec::new(), SequencerTiming::default(), "$");
    assert!(matches!(result, Err(ShowcaseError::Config { .. })));
}

#[test]
fn yaml_showcase_drives_sequencer() {
    let yaml = r#"
prompt: "~$"
timing:
  char_delay_ms: 10
demos:
  - command: "go"
    outputs: ["ok"]
"#;
    let config = ShowcaseConfig::from_yaml(yaml).expect("valid yaml");
    let mut seq = Sequencer::from_config(&config).expect("valid");
    seq.start(ms(0));
    seq.advance_to(ms(20));
    assert_eq!(seq.state().typed_prefix, "go");
    seq.advance_to(ms(520));
    assert_eq!(seq.state().emitted_lines, vec!["~$ go"]);
}

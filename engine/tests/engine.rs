use std::time::Duration;

use simon_core::{
    Celebration, Command, CounterText, Event, GameConfig, Phase, Sequence, Signal,
    MAX_ROUND_LENGTH, START_DELAY,
};
use simon_engine::Engine;

type Timeline = Vec<(Duration, Event)>;

fn engine(strict_mode: bool, celebration: Celebration) -> Engine {
    Engine::from_game_config(&GameConfig {
        strict_mode,
        celebration,
        seed: Some(0x51_30_4e),
    })
}

fn sequence_from(indices: &[u8]) -> Sequence {
    let signals = (0..MAX_ROUND_LENGTH)
        .map(|step| {
            let index = indices.get(step).copied().unwrap_or(0);
            Signal::from_index(index).expect("valid signal")
        })
        .collect();
    Sequence::new(signals).expect("full sequence")
}

/// Runs deferred work until the player may click or nothing is left to do.
fn settle(engine: &mut Engine) -> Timeline {
    let mut timeline = Vec::new();
    while !engine.state().phase.accepts_input() {
        let Some(wait) = engine.next_deadline() else {
            break;
        };
        let mut events = Vec::new();
        engine.advance(wait, &mut events);
        let now = engine.now();
        timeline.extend(events.into_iter().map(|event| (now, event)));
    }
    timeline
}

/// Starts a game, swaps in a prepared sequence and waits for the input window.
fn start_with(engine: &mut Engine, indices: &[u8]) {
    let mut events = Vec::new();
    engine.on_start(&mut events);
    engine.advance(START_DELAY, &mut events);
    engine.submit(
        Command::InstallSequence {
            sequence: sequence_from(indices),
        },
        &mut events,
    );
    let _ = settle(engine);
    assert!(engine.state().phase.accepts_input());
}

fn click(engine: &mut Engine, signal_id: u8) -> Vec<Event> {
    let mut events = Vec::new();
    engine.on_signal_clicked(signal_id, &mut events);
    events
}

/// Reproduces the current round from the installed sequence.
fn play_round(engine: &mut Engine) -> Vec<Event> {
    let state = engine.state();
    let sequence = state.sequence.expect("sequence installed");
    let mut events = Vec::new();
    for signal in sequence.prefix(state.round_length) {
        events.extend(click(engine, signal.index()));
    }
    events
}

fn wrong_signal(engine: &Engine) -> u8 {
    let state = engine.state();
    let expected = state
        .sequence
        .and_then(|sequence| sequence.get(state.cursor))
        .expect("expected signal");
    (expected.index() + 1) % 4
}

fn activations(timeline: &[(Duration, Event)]) -> Vec<(Duration, Signal)> {
    timeline
        .iter()
        .filter_map(|(at, event)| match event {
            Event::SignalActivated { signal, .. } => Some((*at, *signal)),
            _ => None,
        })
        .collect()
}

#[test]
fn first_round_is_presented_after_start_delay() {
    let mut engine = engine(false, Celebration::EveryRound);
    let mut events = Vec::new();
    engine.on_start(&mut events);
    let timeline = settle(&mut engine);

    let state = engine.state();
    let first = state.sequence.and_then(|s| s.get(0)).expect("sequence");
    assert_eq!(
        activations(&timeline),
        vec![(Duration::from_millis(200), first)]
    );
    assert!(timeline.contains(&(
        Duration::from_millis(200),
        Event::CounterChanged {
            text: CounterText::Step(1)
        }
    )));
    assert!(timeline.contains(&(Duration::from_millis(1000), Event::InputOpened)));
    assert_eq!(state.round_length, 1);
    assert_eq!(state.cursor, 0);
    assert!(!state.input_locked);
}

#[test]
fn single_step_round_win_schedules_jingle() {
    let mut engine = engine(false, Celebration::EveryRound);
    start_with(&mut engine, &[2]);

    let events = click(&mut engine, 2);

    assert!(events.contains(&Event::RoundWon {
        round_length: 1,
        final_round: false
    }));
    assert!(events.contains(&Event::CounterChanged {
        text: CounterText::Won
    }));
    let state = engine.state();
    assert_eq!(state.phase, Phase::RoundWon);
    assert!(state.input_locked);
    assert_eq!(state.round_length, 2);

    let mut events = Vec::new();
    engine.advance(Duration::from_millis(600), &mut events);
    assert!(events.contains(&Event::VictoryStarted));
    let jingle = events
        .iter()
        .filter(|event| matches!(event, Event::SignalActivated { .. }))
        .count();
    assert_eq!(jingle, 1, "first jingle flash fires as the jingle starts");
}

#[test]
fn three_step_round_grows_to_four() {
    let mut engine = engine(false, Celebration::FinalRound);
    start_with(&mut engine, &[0, 1, 2]);

    let _ = click(&mut engine, 0);
    let _ = settle(&mut engine);
    let _ = play_round(&mut engine);
    let _ = settle(&mut engine);
    assert_eq!(engine.state().round_length, 3);

    assert!(!click(&mut engine, 0).contains(&Event::RoundWon {
        round_length: 3,
        final_round: false
    }));
    assert_eq!(engine.state().cursor, 1);
    let _ = click(&mut engine, 1);
    let events = click(&mut engine, 2);

    assert!(events.contains(&Event::RoundWon {
        round_length: 3,
        final_round: false
    }));
    assert!(events.contains(&Event::RoundAdvanced { round_length: 4 }));
    assert_eq!(engine.state().round_length, 4);
    assert_eq!(engine.state().cursor, 0);
}

#[test]
fn round_five_is_presented_at_faster_tempo() {
    let mut engine = engine(false, Celebration::FinalRound);
    start_with(&mut engine, &[]);

    for _ in 0..3 {
        let _ = play_round(&mut engine);
        let _ = settle(&mut engine);
    }
    assert_eq!(engine.state().round_length, 4);
    assert_eq!(engine.state().tempo, Duration::from_millis(800));

    let _ = play_round(&mut engine);
    let timeline = settle(&mut engine);

    assert_eq!(engine.state().round_length, 5);
    assert_eq!(engine.state().tempo, Duration::from_millis(670));
    let times: Vec<Duration> = activations(&timeline).into_iter().map(|(at, _)| at).collect();
    assert_eq!(times.len(), 5);
    for pair in times.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::from_millis(670));
    }
}

#[test]
fn clicks_during_presentation_change_nothing() {
    let mut engine = engine(false, Celebration::EveryRound);
    let mut events = Vec::new();
    engine.on_start(&mut events);
    engine.advance(START_DELAY, &mut events);
    assert_eq!(engine.state().phase, Phase::Presenting);

    let before = engine.state();
    let deadline = engine.next_deadline();
    for signal_id in 0..6 {
        let _ = click(&mut engine, signal_id);
    }

    assert_eq!(engine.state(), before);
    assert_eq!(engine.next_deadline(), deadline);
}

#[test]
fn lenient_wrong_click_replays_same_round() {
    let mut engine = engine(false, Celebration::FinalRound);
    start_with(&mut engine, &[]);
    let _ = play_round(&mut engine);
    let _ = settle(&mut engine);
    let before = engine.state();

    let wrong = wrong_signal(&engine);
    let events = click(&mut engine, wrong);

    assert!(events.contains(&Event::CounterChanged {
        text: CounterText::WrongClick
    }));
    let after = engine.state();
    assert_eq!(after.phase, Phase::RoundLost);
    assert_eq!(after.round_length, before.round_length);
    assert_eq!(after.sequence, before.sequence);
    assert_eq!(after.cursor, 0);

    let lost_at = engine.now();
    let timeline = settle(&mut engine);
    let replay = activations(&timeline);
    assert_eq!(replay.len(), before.round_length);
    assert_eq!(replay[0].0, lost_at + Duration::from_millis(750));
}

#[test]
fn strict_wrong_click_regenerates_sequence() {
    let mut engine = engine(true, Celebration::FinalRound);
    start_with(&mut engine, &[]);
    let _ = play_round(&mut engine);
    let _ = settle(&mut engine);
    let _ = play_round(&mut engine);
    let _ = settle(&mut engine);
    let before = engine.state();
    assert_eq!(before.round_length, 3);

    let wrong = wrong_signal(&engine);
    let events = click(&mut engine, wrong);

    assert!(events.contains(&Event::ProgressReset));
    let after = engine.state();
    assert_eq!(after.round_length, 1);
    assert_eq!(after.cursor, 0);
    let sequence = after.sequence.expect("sequence installed");
    assert_eq!(sequence.len(), MAX_ROUND_LENGTH);
    assert_ne!(Some(sequence), before.sequence);
    assert_eq!(after.tempo, before.tempo);
}

#[test]
fn final_round_completes_without_growing() {
    let mut engine = engine(false, Celebration::FinalRound);
    start_with(&mut engine, &[]);

    for _ in 1..MAX_ROUND_LENGTH {
        let _ = play_round(&mut engine);
        let _ = settle(&mut engine);
    }
    assert_eq!(engine.state().round_length, MAX_ROUND_LENGTH);
    assert_eq!(engine.state().tempo, Duration::from_millis(400));

    let events = play_round(&mut engine);
    assert!(events.contains(&Event::RoundWon {
        round_length: MAX_ROUND_LENGTH,
        final_round: true
    }));
    assert!(events.contains(&Event::GameCompleted));

    let timeline = settle(&mut engine);
    assert_eq!(activations(&timeline).len(), 60, "victory jingle plays once");
    assert_eq!(engine.next_deadline(), None);

    let state = engine.state();
    assert!(state.completed);
    assert_eq!(state.round_length, MAX_ROUND_LENGTH);
    assert_eq!(state.phase, Phase::RoundWon);
    assert!(state.input_locked);
    assert!(click(&mut engine, 0)
        .iter()
        .all(|event| matches!(event, Event::ClickIgnored { .. })));
}

#[test]
fn restart_cancels_pending_presentation() {
    let mut engine = engine(false, Celebration::EveryRound);
    start_with(&mut engine, &[1]);
    let _ = click(&mut engine, 1);
    assert!(engine.next_deadline().is_some());

    let mut events = Vec::new();
    engine.on_start(&mut events);
    assert_eq!(engine.state().phase, Phase::Idle);
    assert_eq!(engine.next_deadline(), Some(START_DELAY));

    let timeline = settle(&mut engine);
    assert!(!timeline
        .iter()
        .any(|(_, event)| matches!(event, Event::VictoryStarted)));
    let state = engine.state();
    assert_eq!(state.round_length, 1);
    assert_eq!(state.tempo, Duration::from_millis(800));
    assert!(state.phase.accepts_input());
}

#[test]
fn strict_toggle_is_reported() {
    let mut engine = engine(false, Celebration::EveryRound);
    let mut events = Vec::new();
    engine.on_strict_toggle(&mut events);
    engine.on_strict_toggle(&mut events);

    assert_eq!(
        events,
        vec![
            Event::StrictModeChanged { enabled: true },
            Event::StrictModeChanged { enabled: false },
        ]
    );
    assert!(!engine.state().strict_mode);
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut engine = engine(true, Celebration::EveryRound);
        let mut events = Vec::new();
        engine.on_start(&mut events);
        let mut timeline = settle(&mut engine);
        for _ in 0..3 {
            let _ = play_round(&mut engine);
            timeline.extend(settle(&mut engine));
        }
        let wrong = wrong_signal(&engine);
        let _ = click(&mut engine, wrong);
        timeline.extend(settle(&mut engine));
        (timeline, engine.state())
    };

    assert_eq!(run(), run());
}

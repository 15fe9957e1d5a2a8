#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Simon.
//!
//! The [`World`] owns the single mutable game state together with the virtual
//! clock and the queue of deferred actions. [`apply`] is the only way to
//! mutate it; [`query`] exposes read-only views for systems and adapters.

mod timers;

use std::time::Duration;

use simon_core::{
    ClickOutcome, Command, CounterText, DeferredAction, Event, IgnoredClick, Phase, Sequence,
    Signal, StartLabel, FLASH_DURATION, INITIAL_ROUND_LENGTH, INITIAL_TEMPO, MAX_ROUND_LENGTH,
};
use tracing::{debug, trace, warn};

use crate::timers::TimerQueue;

/// Represents the authoritative Simon game state.
#[derive(Debug)]
pub struct World {
    sequence: Option<Sequence>,
    round_length: usize,
    cursor: usize,
    strict_mode: bool,
    tempo: Duration,
    phase: Phase,
    completed: bool,
    started: bool,
    present_after_install: bool,
    clock: Duration,
    timers: TimerQueue,
}

impl World {
    /// Creates an idle world with strict mode disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strict_mode(false)
    }

    /// Creates an idle world with the provided initial strict setting.
    #[must_use]
    pub fn with_strict_mode(strict_mode: bool) -> Self {
        Self {
            sequence: None,
            round_length: INITIAL_ROUND_LENGTH,
            cursor: 0,
            strict_mode,
            tempo: INITIAL_TEMPO,
            phase: Phase::Idle,
            completed: false,
            started: false,
            present_after_install: false,
            clock: Duration::ZERO,
            timers: TimerQueue::new(),
        }
    }

    fn input_locked(&self) -> bool {
        !self.phase.accepts_input()
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        debug!(from = ?self.phase, to = ?phase, "phase changed");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn schedule(&mut self, delay: Duration, action: DeferredAction) {
        let due = self.clock.saturating_add(delay);
        trace!(?action, ?due, "action scheduled");
        self.timers.push(due, action);
    }

    fn flash(signal: Signal, out_events: &mut Vec<Event>) {
        out_events.push(Event::SignalActivated {
            signal,
            duration: FLASH_DURATION,
        });
    }

    fn request_round(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::RoundRequested {
            round_length: self.round_length,
            tempo: self.tempo,
        });
    }

    fn fire(&mut self, action: DeferredAction, out_events: &mut Vec<Event>) {
        match action {
            DeferredAction::BeginGame => {
                self.round_length = INITIAL_ROUND_LENGTH;
                self.cursor = 0;
                self.tempo = INITIAL_TEMPO;
                self.completed = false;
                self.present_after_install = true;
                out_events.push(Event::SequenceRequested);
            }
            DeferredAction::Activate { signal } => Self::flash(signal, out_events),
            DeferredAction::OpenInput => {
                if self.phase != Phase::Presenting {
                    warn!(phase = ?self.phase, "input window opened outside a presentation");
                    return;
                }
                self.cursor = 0;
                self.set_phase(Phase::AwaitingInput, out_events);
                out_events.push(Event::InputOpened);
            }
            DeferredAction::PresentRound => self.request_round(out_events),
            DeferredAction::StartVictory => out_events.push(Event::VictoryStarted),
        }
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let target = self.clock.saturating_add(dt);
        let instant = self
            .timers
            .next_due()
            .map_or(target, |due| due.min(target));
        let elapsed = instant.saturating_sub(self.clock);
        self.clock = instant;
        if !elapsed.is_zero() {
            out_events.push(Event::TimeAdvanced { dt: elapsed });
        }

        for action in self.timers.drain_due(instant) {
            self.fire(action, out_events);
        }
    }

    fn click(&mut self, signal_id: u8, out_events: &mut Vec<Event>) {
        let Some(signal) = Signal::from_index(signal_id) else {
            trace!(signal_id, "click on unknown signal ignored");
            out_events.push(Event::ClickIgnored {
                reason: IgnoredClick::UnknownSignal { signal_id },
            });
            return;
        };

        if self.input_locked() {
            trace!(%signal, phase = ?self.phase, "click ignored while input is locked");
            out_events.push(Event::ClickIgnored {
                reason: IgnoredClick::InputLocked,
            });
            return;
        }

        out_events.push(Event::SignalClicked { signal });
    }

    fn resolve(&mut self, outcome: ClickOutcome, out_events: &mut Vec<Event>) {
        if self.input_locked() {
            warn!(?outcome, "click verdict arrived while input is locked");
            return;
        }

        match outcome {
            ClickOutcome::Correct { signal } => {
                Self::flash(signal, out_events);
                self.cursor = (self.cursor + 1).min(self.round_length);
                out_events.push(Event::CursorAdvanced {
                    cursor: self.cursor,
                });
            }
            ClickOutcome::RoundComplete { signal } => {
                self.set_phase(Phase::RoundWon, out_events);
                Self::flash(signal, out_events);
                self.cursor = 0;
                out_events.push(Event::CounterChanged {
                    text: CounterText::Won,
                });
                out_events.push(Event::RoundWon {
                    round_length: self.round_length,
                    final_round: self.round_length >= MAX_ROUND_LENGTH,
                });
            }
            ClickOutcome::Wrong { signal, expected } => {
                debug!(%signal, %expected, cursor = self.cursor, "wrong click");
                self.set_phase(Phase::RoundLost, out_events);
                out_events.push(Event::CounterChanged {
                    text: CounterText::WrongClick,
                });
                for signal in Signal::ALL {
                    Self::flash(signal, out_events);
                }
                self.cursor = 0;
                out_events.push(Event::RoundLost {
                    strict_mode: self.strict_mode,
                });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => {
            world.timers.clear();
            world.present_after_install = false;
            world.set_phase(Phase::Idle, out_events);
            if !world.started {
                world.started = true;
                out_events.push(Event::StartLabelChanged {
                    label: StartLabel::Restart,
                });
            }
            world.schedule(simon_core::START_DELAY, DeferredAction::BeginGame);
        }
        Command::ToggleStrict => {
            world.strict_mode = !world.strict_mode;
            debug!(enabled = world.strict_mode, "strict mode toggled");
            out_events.push(Event::StrictModeChanged {
                enabled: world.strict_mode,
            });
        }
        Command::ClickSignal { signal_id } => world.click(signal_id, out_events),
        Command::Tick { dt } => world.advance_clock(dt, out_events),
        Command::InstallSequence { sequence } => {
            world.sequence = Some(sequence);
            if world.present_after_install {
                world.present_after_install = false;
                world.request_round(out_events);
            }
        }
        Command::BeginPresentation { tempo } => {
            if world.sequence.is_none() {
                warn!("presentation requested before a sequence was installed");
                return;
            }
            if tempo < world.tempo {
                debug!(tempo_ms = tempo.as_millis(), "tempo changed");
                world.tempo = tempo;
                out_events.push(Event::TempoChanged { tempo });
            }
            world.cursor = 0;
            world.set_phase(Phase::Presenting, out_events);
            out_events.push(Event::CounterChanged {
                text: CounterText::Step(world.round_length),
            });
            out_events.push(Event::PresentationStarted {
                round_length: world.round_length,
                tempo: world.tempo,
            });
        }
        Command::Schedule { delay, action } => world.schedule(delay, action),
        Command::ResolveClick { outcome } => world.resolve(outcome, out_events),
        Command::ResetProgress => {
            world.round_length = INITIAL_ROUND_LENGTH;
            world.cursor = 0;
            out_events.push(Event::ProgressReset);
            out_events.push(Event::SequenceRequested);
        }
        Command::AdvanceRound => {
            if world.round_length >= MAX_ROUND_LENGTH {
                warn!("round already covers the whole sequence");
                return;
            }
            world.round_length += 1;
            world.cursor = 0;
            out_events.push(Event::RoundAdvanced {
                round_length: world.round_length,
            });
        }
        Command::CompleteGame => {
            if !world.completed {
                world.completed = true;
                out_events.push(Event::GameCompleted);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use simon_core::{GameSnapshot, Phase, RoundView, Sequence};

    use super::World;

    /// Captures a snapshot of the whole game state.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            sequence: world.sequence.clone(),
            round_length: world.round_length,
            cursor: world.cursor,
            strict_mode: world.strict_mode,
            tempo: world.tempo,
            input_locked: world.input_locked(),
            phase: world.phase,
            completed: world.completed,
        }
    }

    /// Captures the view the input validator resolves clicks against.
    #[must_use]
    pub fn round_view(world: &World) -> RoundView {
        RoundView {
            expected: world
                .sequence
                .as_ref()
                .and_then(|sequence| sequence.get(world.cursor)),
            cursor: world.cursor,
            round_length: world.round_length,
        }
    }

    /// Provides read-only access to the installed sequence.
    #[must_use]
    pub fn sequence(world: &World) -> Option<&Sequence> {
        world.sequence.as_ref()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Current reading of the world clock.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.clock
    }

    /// Instant at which the next deferred action is due.
    #[must_use]
    pub fn next_due(world: &World) -> Option<Duration> {
        world.timers.next_due()
    }

    /// Number of deferred actions still waiting to fire.
    #[must_use]
    pub fn pending_actions(world: &World) -> usize {
        world.timers.len()
    }
}

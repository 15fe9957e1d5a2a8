#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty system that owns tempo progression, round growth, the strict
//! reset policy and the victory jingle.

use std::time::Duration;

use simon_core::{
    Celebration, Command, DeferredAction, Event, Signal, ADVANCE_PAUSE, INITIAL_TEMPO,
    TEMPO_TIERS, VICTORY_INTERVAL, VICTORY_PATTERN, VICTORY_PAUSE, VICTORY_STEPS,
    WRONG_CLICK_PAUSE,
};
use tracing::debug;

/// Configuration parameters required to construct the difficulty system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    celebration: Celebration,
}

impl Config {
    /// Creates a new configuration using the provided celebration policy.
    #[must_use]
    pub const fn new(celebration: Celebration) -> Self {
        Self { celebration }
    }
}

/// Pure system that reacts to round outcomes with pacing decisions.
#[derive(Debug, Default)]
pub struct Difficulty {
    celebration: Celebration,
}

impl Difficulty {
    /// Creates a new difficulty system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            celebration: config.celebration,
        }
    }

    /// Consumes round lifecycle events and emits pacing commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match *event {
                Event::RoundRequested {
                    round_length,
                    tempo,
                } => out.push(Command::BeginPresentation {
                    tempo: next_tempo(tempo, round_length),
                }),
                Event::RoundLost { strict_mode } => {
                    if strict_mode {
                        debug!("strict mode resets progress");
                        out.push(Command::ResetProgress);
                    }
                    out.push(Command::Schedule {
                        delay: WRONG_CLICK_PAUSE,
                        action: DeferredAction::PresentRound,
                    });
                }
                Event::RoundWon { final_round, .. } => self.handle_round_won(final_round, out),
                Event::VictoryStarted => {
                    out.extend(victory_jingle().map(|(delay, signal)| Command::Schedule {
                        delay,
                        action: DeferredAction::Activate { signal },
                    }));
                }
                _ => {}
            }
        }
    }

    fn handle_round_won(&self, final_round: bool, out: &mut Vec<Command>) {
        if final_round {
            out.push(Command::CompleteGame);
            out.push(Command::Schedule {
                delay: VICTORY_PAUSE,
                action: DeferredAction::StartVictory,
            });
            return;
        }

        out.push(Command::AdvanceRound);
        let next_round_delay = match self.celebration {
            Celebration::EveryRound => {
                out.push(Command::Schedule {
                    delay: VICTORY_PAUSE,
                    action: DeferredAction::StartVictory,
                });
                VICTORY_PAUSE + jingle_length() + ADVANCE_PAUSE
            }
            Celebration::FinalRound => ADVANCE_PAUSE,
        };
        out.push(Command::Schedule {
            delay: next_round_delay,
            action: DeferredAction::PresentRound,
        });
    }
}

/// Tempo the tier table prescribes for a round of the provided length.
#[must_use]
pub fn tempo_for(round_length: usize) -> Duration {
    TEMPO_TIERS
        .iter()
        .rev()
        .find(|(threshold, _)| round_length > *threshold)
        .map_or(INITIAL_TEMPO, |(_, tempo)| *tempo)
}

/// Tempo for the next presentation; never slower than the current one.
#[must_use]
pub fn next_tempo(current: Duration, round_length: usize) -> Duration {
    current.min(tempo_for(round_length))
}

/// Offsets and signals of the victory jingle, relative to its start.
pub fn victory_jingle() -> impl Iterator<Item = (Duration, Signal)> {
    (0..VICTORY_STEPS).map(|step| {
        let offset = VICTORY_INTERVAL.saturating_mul(u32::try_from(step).unwrap_or(u32::MAX));
        (offset, VICTORY_PATTERN[step % VICTORY_PATTERN.len()])
    })
}

/// Total length of the victory jingle.
#[must_use]
pub fn jingle_length() -> Duration {
    VICTORY_INTERVAL.saturating_mul(u32::try_from(VICTORY_STEPS).unwrap_or(u32::MAX))
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Playback system that turns a round presentation into timed activations.

use std::time::Duration;

use simon_core::{Command, DeferredAction, Event, Sequence};

/// Pure system that schedules the flashes of a round and the input window.
#[derive(Debug, Default)]
pub struct Playback;

impl Playback {
    /// Consumes presentation events and emits the matching schedule commands.
    ///
    /// Step `i` of the round fires at `i * tempo`; input opens one further
    /// tempo interval after the final step.
    pub fn handle(
        &mut self,
        events: &[Event],
        sequence: Option<&Sequence>,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            let Event::PresentationStarted {
                round_length,
                tempo,
            } = *event
            else {
                continue;
            };
            let Some(sequence) = sequence else {
                continue;
            };

            let steps = sequence.prefix(round_length);
            for (index, signal) in steps.iter().enumerate() {
                out.push(Command::Schedule {
                    delay: step_offset(tempo, index),
                    action: DeferredAction::Activate { signal: *signal },
                });
            }
            out.push(Command::Schedule {
                delay: step_offset(tempo, steps.len()),
                action: DeferredAction::OpenInput,
            });
        }
    }
}

fn step_offset(tempo: Duration, index: usize) -> Duration {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    tempo.saturating_mul(index)
}

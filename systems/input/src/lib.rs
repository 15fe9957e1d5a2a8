#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input validation system that resolves player clicks against the round.

use simon_core::{ClickOutcome, Command, Event, RoundView, Signal};
use tracing::warn;

/// Pure system that judges each accepted click.
#[derive(Debug, Default)]
pub struct InputValidator;

impl InputValidator {
    /// Consumes click events and emits one verdict per click.
    ///
    /// The world only reports clicks while input is open, so each
    /// `SignalClicked` is resolved against the provided round view.
    pub fn handle(&mut self, events: &[Event], view: RoundView, out: &mut Vec<Command>) {
        for event in events {
            let Event::SignalClicked { signal } = *event else {
                continue;
            };
            match resolve(view, signal) {
                Some(outcome) => out.push(Command::ResolveClick { outcome }),
                None => warn!(%signal, "click arrived before a sequence was installed"),
            }
        }
    }
}

/// Compares a click with the step the round expects next.
///
/// Returns `None` when no sequence is installed.
#[must_use]
pub fn resolve(view: RoundView, signal: Signal) -> Option<ClickOutcome> {
    let expected = view.expected?;
    let outcome = if signal != expected {
        ClickOutcome::Wrong { signal, expected }
    } else if view.cursor + 1 >= view.round_length {
        ClickOutcome::RoundComplete { signal }
    } else {
        ClickOutcome::Correct { signal }
    };
    Some(outcome)
}

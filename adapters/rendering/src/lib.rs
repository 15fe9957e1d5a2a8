#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Simon adapters.
//!
//! The engine speaks in [`Event`]s; a [`Frontend`] speaks in board
//! operations. [`present`] translates the former into the latter so every
//! adapter renders the same game the same way.

use std::time::Duration;

use anyhow::Result as AnyResult;
use simon_core::{CounterText, Event, Signal, SignalColor, StartLabel};

/// Amount a flashing signal is lightened towards white.
pub const LIT_AMOUNT: f32 = 0.55;

/// Board operations an adapter must be able to perform.
pub trait Frontend {
    /// Lights the provided signal and plays its tone for `duration`.
    fn activate_signal(&mut self, signal: Signal, duration: Duration) -> AnyResult<()>;

    /// Replaces the text shown on the round counter.
    fn set_counter_text(&mut self, text: &str) -> AnyResult<()>;

    /// Updates the strict button to reflect the current strict setting.
    fn set_strict_label(&mut self, strict_mode: bool) -> AnyResult<()>;

    /// Updates the caption of the start button.
    fn set_start_label(&mut self, label: StartLabel) -> AnyResult<()>;

    /// Announces that the victory jingle is about to play.
    ///
    /// The jingle flashes themselves arrive through [`Frontend::activate_signal`].
    fn play_victory_sequence(&mut self) -> AnyResult<()>;
}

/// Forwards every presentable event to the frontend, in order.
///
/// Events that carry no presentation (clock ticks, bookkeeping) are skipped.
/// The first frontend failure stops dispatch and is returned to the caller.
pub fn present<F>(events: &[Event], frontend: &mut F) -> AnyResult<()>
where
    F: Frontend + ?Sized,
{
    for event in events {
        match *event {
            Event::SignalActivated { signal, duration } => {
                frontend.activate_signal(signal, duration)?;
            }
            Event::CounterChanged { text } => frontend.set_counter_text(&counter_text(text))?,
            Event::StrictModeChanged { enabled } => frontend.set_strict_label(enabled)?,
            Event::StartLabelChanged { label } => frontend.set_start_label(label)?,
            Event::VictoryStarted => frontend.play_victory_sequence()?,
            _ => {}
        }
    }
    Ok(())
}

/// Text rendered on the round counter.
#[must_use]
pub fn counter_text(text: CounterText) -> String {
    text.to_string()
}

/// Caption of the strict button, naming what the next toggle will do.
#[must_use]
pub const fn strict_button_label(strict_mode: bool) -> &'static str {
    if strict_mode {
        "Strict Off"
    } else {
        "Strict On"
    }
}

/// Colour a signal is drawn with, brightened while it flashes.
#[must_use]
pub fn signal_color(signal: Signal, lit: bool) -> SignalColor {
    let base = signal.profile().color();
    if lit {
        lighten(base, LIT_AMOUNT)
    } else {
        base
    }
}

/// Returns the colour lightened towards white by the provided amount.
#[must_use]
pub fn lighten(color: SignalColor, amount: f32) -> SignalColor {
    let amount = amount.clamp(0.0, 1.0);
    SignalColor::from_rgb(
        lighten_channel(color.red(), amount),
        lighten_channel(color.green(), amount),
        lighten_channel(color.blue(), amount),
    )
}

fn lighten_channel(channel: u8, amount: f32) -> u8 {
    let channel = f32::from(channel);
    let lightened = channel + (255.0 - channel) * amount;
    lightened.round().clamp(0.0, 255.0) as u8
}

//! Line-oriented terminal frontend.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use simon_core::{Signal, StartLabel};
use simon_rendering::{signal_color, strict_button_label, Frontend};

/// Renders board operations as lines of text on the provided writer.
#[derive(Debug)]
pub(crate) struct TerminalFrontend<W> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalFrontend<W> {
    /// Creates a frontend writing to `out`, optionally with ANSI colours.
    pub(crate) fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Writes a free-form message that is not part of the board.
    pub(crate) fn notice(&mut self, message: &str) -> Result<()> {
        self.line(format_args!("{message}"))
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        self.out
            .write_fmt(args)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush())
            .context("failed to write to the terminal")
    }

    fn swatch(&self, signal: Signal) -> String {
        if !self.color {
            return format!("[{}]", signal.index());
        }
        let color = signal_color(signal, true);
        format!(
            "\x1b[48;2;{};{};{}m {} \x1b[0m",
            color.red(),
            color.green(),
            color.blue(),
            signal.index()
        )
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn activate_signal(&mut self, signal: Signal, duration: Duration) -> Result<()> {
        let swatch = self.swatch(signal);
        let profile = signal.profile();
        self.line(format_args!(
            "{swatch} {:<6} {} Hz for {} ms",
            profile.name(),
            profile.tone_hz(),
            duration.as_millis()
        ))
    }

    fn set_counter_text(&mut self, text: &str) -> Result<()> {
        self.line(format_args!("counter: {text}"))
    }

    fn set_strict_label(&mut self, strict_mode: bool) -> Result<()> {
        let state = if strict_mode { "on" } else { "off" };
        self.line(format_args!(
            "strict mode {state} (t: {})",
            strict_button_label(strict_mode)
        ))
    }

    fn set_start_label(&mut self, label: StartLabel) -> Result<()> {
        self.line(format_args!("(s: {label})"))
    }

    fn play_victory_sequence(&mut self) -> Result<()> {
        self.line(format_args!("*** victory ***"))
    }
}

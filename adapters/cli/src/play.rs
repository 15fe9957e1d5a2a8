//! Interactive play loop driven by lines read from standard input.

use std::{
    io::{BufRead, Write},
    thread,
};

use anyhow::{Context, Result};
use simon_core::Signal;
use simon_engine::Engine;
use simon_rendering::{present, Frontend};
use tracing::debug;

use crate::terminal::TerminalFrontend;

/// Controls shown before interactive play begins.
pub(crate) const HELP: &str = "\
controls: s start/restart, t toggle strict, q quit
click a signal with its number (0-3) or initial (g r y b); several per line are fine";

/// Whether deferred work waits for wall-clock time to pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pace {
    /// Sleep until each deadline, so flashes appear at the game tempo.
    RealTime,
    /// Jump straight to each deadline.
    Instant,
}

impl Pace {
    pub(crate) fn from_fast(fast: bool) -> Self {
        if fast {
            Self::Instant
        } else {
            Self::RealTime
        }
    }
}

/// Single player action parsed from a token of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerInput {
    Start,
    ToggleStrict,
    Quit,
    Click(u8),
}

fn parse_token(token: &str) -> Option<PlayerInput> {
    let token = token.to_ascii_lowercase();
    match token.as_str() {
        "s" | "start" | "restart" => return Some(PlayerInput::Start),
        "t" | "strict" => return Some(PlayerInput::ToggleStrict),
        "q" | "quit" | "exit" => return Some(PlayerInput::Quit),
        _ => {}
    }
    if let Ok(signal_id) = token.parse::<u8>() {
        return Some(PlayerInput::Click(signal_id));
    }
    Signal::ALL
        .into_iter()
        .find(|signal| {
            let name = signal.profile().name().to_ascii_lowercase();
            token == name || name.starts_with(&token)
        })
        .map(|signal| PlayerInput::Click(signal.index()))
}

/// Runs deferred work until the player may click or nothing is left to do.
pub(crate) fn settle<F>(engine: &mut Engine, frontend: &mut F, pace: Pace) -> Result<()>
where
    F: Frontend + ?Sized,
{
    let mut events = Vec::new();
    while !engine.state().phase.accepts_input() {
        let Some(wait) = engine.next_deadline() else {
            break;
        };
        if pace == Pace::RealTime {
            thread::sleep(wait);
        }
        events.clear();
        engine.advance(wait, &mut events);
        present(&events, frontend)?;
    }
    Ok(())
}

/// Plays a session, reading whitespace separated actions from `input`.
pub(crate) fn run<R, W>(
    engine: &mut Engine,
    input: R,
    frontend: &mut TerminalFrontend<W>,
    pace: Pace,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut events = Vec::new();
    for line in input.lines() {
        let line = line.context("failed to read player input")?;
        for token in line.split_whitespace() {
            let Some(action) = parse_token(token) else {
                frontend.notice(&format!("unrecognised input `{token}`"))?;
                continue;
            };
            debug!(?action, "player input");
            events.clear();
            match action {
                PlayerInput::Start => engine.on_start(&mut events),
                PlayerInput::ToggleStrict => engine.on_strict_toggle(&mut events),
                PlayerInput::Click(signal_id) => {
                    engine.on_signal_clicked(signal_id, &mut events);
                }
                PlayerInput::Quit => return Ok(()),
            }
            present(&events, frontend)?;
            settle(engine, frontend, pace)?;
        }
    }
    Ok(())
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Simon memory game in a terminal.

mod args;
mod config;
mod demo;
mod play;
mod terminal;

use std::io;

use anyhow::Result;
use clap::Parser;
use simon_engine::Engine;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    args::{CliArgs, Mode},
    demo::DemoOptions,
    play::Pace,
    terminal::TerminalFrontend,
};

/// Entry point for the Simon command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let config = args.game_config()?;
    info!(?config, "configuration resolved");
    let mut engine = Engine::from_game_config(&config);
    let mut frontend = TerminalFrontend::new(io::stdout().lock(), !args.no_color);

    match args.mode() {
        Mode::Play { fast } => {
            frontend.notice(play::HELP)?;
            play::run(
                &mut engine,
                io::stdin().lock(),
                &mut frontend,
                Pace::from_fast(fast),
            )
        }
        Mode::Demo {
            mistake_rate,
            rounds,
        } => {
            let options = DemoOptions {
                mistake_rate,
                rounds,
                seed: config.seed.unwrap_or_else(rand::random),
            };
            let summary = demo::run(&mut engine, &mut frontend, options)?;
            frontend.notice(&summary.to_string())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

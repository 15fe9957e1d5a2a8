//! Command-line arguments.

use std::path::PathBuf;

use anyhow::Result;
use clap::{builder::TypedValueParser, Parser, Subcommand};
use simon_core::{GameConfig, MAX_ROUND_LENGTH};

use crate::config;

/// Simon - repeat the growing sequence of coloured signals.
#[derive(Debug, Parser)]
#[command(name = "simon", version)]
#[command(about = "Play the Simon memory game in a terminal", long_about = None)]
pub(crate) struct CliArgs {
    /// TOML file providing the game configuration.
    #[arg(long, value_name = "PATH", global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Seed for the sequence generator, overriding the configuration.
    #[arg(long, global = true)]
    pub(crate) seed: Option<u64>,

    /// Start with strict mode enabled, overriding the configuration.
    #[arg(long, global = true)]
    pub(crate) strict: bool,

    /// Disable ANSI colours in the board output.
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Mode to run; defaults to interactive play.
    #[command(subcommand)]
    pub(crate) mode: Option<Mode>,
}

/// Available modes.
#[derive(Clone, Copy, Debug, PartialEq, Subcommand)]
pub(crate) enum Mode {
    /// Play interactively from standard input.
    Play {
        /// Skip the real-time pauses between flashes.
        #[arg(long)]
        fast: bool,
    },

    /// Let a scripted player run through the game on a virtual clock.
    Demo {
        /// Probability that the scripted player clicks a wrong signal.
        #[arg(long, default_value_t = 0.0, value_parser = parse_rate)]
        mistake_rate: f64,

        /// Stop once this many rounds have been cleared.
        #[arg(
            long,
            default_value_t = MAX_ROUND_LENGTH,
            value_parser = clap::value_parser!(u8).range(1..=16).map(usize::from)
        )]
        rounds: usize,
    },
}

impl CliArgs {
    /// Mode selected on the command line.
    pub(crate) fn mode(&self) -> Mode {
        self.mode.unwrap_or(Mode::Play { fast: false })
    }

    /// Loads the configuration file, if any, and applies flag overrides.
    pub(crate) fn game_config(&self) -> Result<GameConfig> {
        let mut game_config = match &self.config {
            Some(path) => config::load(path)?,
            None => GameConfig::default(),
        };
        if self.strict {
            game_config.strict_mode = true;
        }
        if self.seed.is_some() {
            game_config.seed = self.seed;
        }
        Ok(game_config)
    }
}

fn parse_rate(value: &str) -> Result<f64, String> {
    let rate: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("mistake rate must lie within 0..=1 (received {rate})"))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn play_is_the_default_mode() {
        let args = CliArgs::try_parse_from(["simon"]).expect("no arguments are required");
        assert_eq!(args.mode(), Mode::Play { fast: false });
        assert_eq!(args.game_config().expect("defaults"), GameConfig::default());
    }

    #[test]
    fn flags_override_configuration() {
        let args = CliArgs::try_parse_from(["simon", "demo", "--strict", "--seed", "7"])
            .expect("valid arguments");

        let config = args.game_config().expect("no file to load");
        assert!(config.strict_mode);
        assert_eq!(config.seed, Some(7));
        assert_eq!(
            args.mode(),
            Mode::Demo {
                mistake_rate: 0.0,
                rounds: MAX_ROUND_LENGTH
            }
        );
    }

    #[test]
    fn demo_arguments_are_validated() {
        assert!(CliArgs::try_parse_from(["simon", "demo", "--mistake-rate", "1.5"]).is_err());
        assert!(CliArgs::try_parse_from(["simon", "demo", "--rounds", "17"]).is_err());
        assert!(CliArgs::try_parse_from(["simon", "demo", "--rounds", "0"]).is_err());

        let args = CliArgs::try_parse_from([
            "simon",
            "demo",
            "--mistake-rate",
            "0.25",
            "--rounds",
            "4",
        ])
        .expect("valid arguments");
        assert_eq!(
            args.mode(),
            Mode::Demo {
                mistake_rate: 0.25,
                rounds: 4
            }
        );
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = CliArgs::try_parse_from(["simon", "--config", "/nonexistent/simon.toml"])
            .expect("valid arguments");

        let error = args.game_config().expect_err("file does not exist");
        assert!(error.to_string().contains("/nonexistent/simon.toml"));
    }
}

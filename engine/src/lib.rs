#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game engine that owns the Simon world and its systems.
//!
//! Adapters relay discrete player events (`on_start`, `on_strict_toggle`,
//! `on_signal_clicked`) and the passage of time (`advance`). Each call applies
//! the resulting command, lets every system react to the events it produced,
//! and keeps going until no system has anything left to say. Only then does
//! control return to the adapter, so every transition is observed atomically.

use std::time::Duration;

use simon_core::{Command, Event, GameConfig, GameSnapshot};
use simon_system_difficulty::{self as difficulty, Difficulty};
use simon_system_input::InputValidator;
use simon_system_playback::Playback;
use simon_system_sequence::{self as sequence, SequenceGenerator};
use simon_world::{self as world, query, World};
use tracing::debug;

/// Configuration parameters required to construct the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    strict_mode: bool,
    sequence: sequence::Config,
    difficulty: difficulty::Config,
}

impl EngineConfig {
    /// Creates a new engine configuration.
    #[must_use]
    pub const fn new(
        strict_mode: bool,
        sequence: sequence::Config,
        difficulty: difficulty::Config,
    ) -> Self {
        Self {
            strict_mode,
            sequence,
            difficulty,
        }
    }
}

impl From<&GameConfig> for EngineConfig {
    fn from(config: &GameConfig) -> Self {
        let sequence = config
            .seed
            .map_or_else(sequence::Config::from_entropy, sequence::Config::seeded);
        Self::new(
            config.strict_mode,
            sequence,
            difficulty::Config::new(config.celebration),
        )
    }
}

/// Owns the game state and drives every system to quiescence.
#[derive(Debug)]
pub struct Engine {
    world: World,
    sequence_generator: SequenceGenerator,
    difficulty: Difficulty,
    input: InputValidator,
    playback: Playback,
}

impl Engine {
    /// Creates an idle engine using the supplied configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            world: World::with_strict_mode(config.strict_mode),
            sequence_generator: SequenceGenerator::new(config.sequence),
            difficulty: Difficulty::new(config.difficulty),
            input: InputValidator,
            playback: Playback,
        }
    }

    /// Creates an idle engine from player facing configuration.
    #[must_use]
    pub fn from_game_config(config: &GameConfig) -> Self {
        Self::new(EngineConfig::from(config))
    }

    /// Handles the start (or restart) button.
    pub fn on_start(&mut self, out: &mut Vec<Event>) {
        debug!("start pressed");
        self.submit(Command::Start, out);
    }

    /// Handles the strict mode toggle.
    pub fn on_strict_toggle(&mut self, out: &mut Vec<Event>) {
        debug!("strict toggled");
        self.submit(Command::ToggleStrict, out);
    }

    /// Handles a click on the signal with the provided raw identifier.
    pub fn on_signal_clicked(&mut self, signal_id: u8, out: &mut Vec<Event>) {
        debug!(signal_id, "signal clicked");
        self.submit(Command::ClickSignal { signal_id }, out);
    }

    /// Advances the clock by `dt`, firing every deferred action that falls due.
    ///
    /// Actions scheduled with no delay while the engine reacts are fired within
    /// the same call.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<Event>) {
        let target = query::now(&self.world).saturating_add(dt);
        loop {
            let now = query::now(&self.world);
            let remaining = target.saturating_sub(now);
            let due_now = query::next_due(&self.world).is_some_and(|due| due <= now);
            if remaining.is_zero() && !due_now {
                break;
            }
            self.submit(Command::Tick { dt: remaining }, out);
        }
    }

    /// Time until the next deferred action fires, if any is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        query::next_due(&self.world).map(|due| due.saturating_sub(query::now(&self.world)))
    }

    /// Current reading of the engine clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        query::now(&self.world)
    }

    /// Captures a snapshot of the game state.
    #[must_use]
    pub fn state(&self) -> GameSnapshot {
        query::snapshot(&self.world)
    }

    /// Provides read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Applies an arbitrary command and lets every system react to it.
    ///
    /// Adapters normally go through the `on_*` helpers; scripted sessions and
    /// tests may inject commands such as a prepared sequence directly.
    pub fn submit(&mut self, command: Command, out: &mut Vec<Event>) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        while !events.is_empty() {
            let mut commands = Vec::new();
            self.sequence_generator.handle(&events, &mut commands);
            self.difficulty.handle(&events, &mut commands);
            self.input
                .handle(&events, query::round_view(&self.world), &mut commands);
            self.playback
                .handle(&events, query::sequence(&self.world), &mut commands);
            out.append(&mut events);

            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
    }
}

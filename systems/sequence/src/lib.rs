#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Sequence generation system that answers requests for fresh target sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use simon_core::{Command, Event, Sequence, Signal, MAX_ROUND_LENGTH};
use tracing::debug;

/// Configuration parameters required to construct the sequence generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    seed: Option<u64>,
}

impl Config {
    /// Seeds the generator from operating system entropy.
    #[must_use]
    pub const fn from_entropy() -> Self {
        Self { seed: None }
    }

    /// Seeds the generator deterministically so games can be replayed.
    #[must_use]
    pub const fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Pure system that produces uniformly random sequences on request.
#[derive(Debug)]
pub struct SequenceGenerator {
    rng: ChaCha8Rng,
}

impl SequenceGenerator {
    /// Creates a new generator using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng }
    }

    /// Draws a fresh full-length sequence.
    pub fn generate_sequence(&mut self) -> Sequence {
        let signals = generate(&mut self.rng, MAX_ROUND_LENGTH);
        for (step, signal) in signals.iter().enumerate() {
            debug!("{}: {}", step + 1, signal);
        }
        Sequence::new(signals).expect("generated sequences always have full length")
    }

    /// Consumes events and emits one install command per sequence request.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if matches!(event, Event::SequenceRequested) {
                let sequence = self.generate_sequence();
                out.push(Command::InstallSequence { sequence });
            }
        }
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new(Config::from_entropy())
    }
}

/// Draws `length` independent, uniformly distributed signals.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Signal> {
    (0..length)
        .map(|_| Signal::ALL[rng.gen_range(0..Signal::COUNT)])
        .collect()
}

//! Scripted autoplay on the engine's virtual clock.

use std::fmt;

use anyhow::{bail, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use simon_engine::Engine;
use simon_rendering::{present, Frontend};
use tracing::info;

use crate::play::{settle, Pace};

/// Upper bound on scripted clicks in one session.
const MAX_CLICKS: usize = 10_000;

/// Parameters of a scripted session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DemoOptions {
    pub(crate) mistake_rate: f64,
    pub(crate) rounds: usize,
    pub(crate) seed: u64,
}

/// Outcome of a scripted session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DemoSummary {
    rounds_cleared: usize,
    clicks: usize,
    mistakes: usize,
    completed: bool,
    elapsed_ms: u128,
}

impl fmt::Display for DemoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cleared {} round(s) with {} click(s) and {} mistake(s) in {} ms of game time",
            self.rounds_cleared, self.clicks, self.mistakes, self.elapsed_ms
        )?;
        if self.completed {
            f.write_str("; game completed")?;
        }
        Ok(())
    }
}

/// Plays until `options.rounds` rounds are cleared, clicking wrong signals at
/// the configured rate.
pub(crate) fn run<F>(
    engine: &mut Engine,
    frontend: &mut F,
    options: DemoOptions,
) -> Result<DemoSummary>
where
    F: Frontend + ?Sized,
{
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut summary = DemoSummary::default();
    let mut events = Vec::new();
    engine.on_start(&mut events);
    present(&events, frontend)?;

    while summary.clicks < MAX_CLICKS {
        settle(engine, frontend, Pace::Instant)?;
        let state = engine.state();
        summary.rounds_cleared = if state.completed {
            state.round_length
        } else {
            state.round_length - 1
        };
        summary.completed = state.completed;
        summary.elapsed_ms = engine.now().as_millis();
        if state.completed || summary.rounds_cleared >= options.rounds {
            info!(%summary, "demo finished");
            return Ok(summary);
        }

        let expected = state
            .sequence
            .as_ref()
            .and_then(|sequence| sequence.get(state.cursor));
        let Some(expected) = expected.filter(|_| state.phase.accepts_input()) else {
            bail!("game stalled in phase {:?} with nothing scheduled", state.phase);
        };
        let signal_id = if rng.gen_bool(options.mistake_rate) {
            summary.mistakes += 1;
            (expected.index() + rng.gen_range(1..4)) % 4
        } else {
            expected.index()
        };

        summary.clicks += 1;
        events.clear();
        engine.on_signal_clicked(signal_id, &mut events);
        present(&events, frontend)?;
    }

    bail!("demo gave up after {MAX_CLICKS} clicks")
}

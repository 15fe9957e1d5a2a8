#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Simon engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! adapters to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of steps in a full game; every generated sequence has this length.
pub const MAX_ROUND_LENGTH: usize = 16;

/// Round length used when a game starts or a strict failure resets progress.
pub const INITIAL_ROUND_LENGTH: usize = 1;

/// How long a single signal stays lit, independent of the tempo.
pub const FLASH_DURATION: Duration = Duration::from_millis(175);

/// Interval between presented steps at the start of a game.
pub const INITIAL_TEMPO: Duration = Duration::from_millis(800);

/// Tempo tiers as `(round lengths strictly above, tempo)`, fastest last.
pub const TEMPO_TIERS: [(usize, Duration); 3] = [
    (4, Duration::from_millis(670)),
    (8, Duration::from_millis(540)),
    (12, Duration::from_millis(400)),
];

/// Delay between pressing start and the first presentation.
pub const START_DELAY: Duration = Duration::from_millis(200);

/// Pause after a wrong click before the round is replayed.
pub const WRONG_CLICK_PAUSE: Duration = Duration::from_millis(750);

/// Pause after a round win before the victory jingle begins.
pub const VICTORY_PAUSE: Duration = Duration::from_millis(600);

/// Pause before the next, longer round is presented.
pub const ADVANCE_PAUSE: Duration = Duration::from_millis(1000);

/// Number of flashes that make up the victory jingle.
pub const VICTORY_STEPS: usize = 60;

/// Spacing between victory jingle flashes.
pub const VICTORY_INTERVAL: Duration = Duration::from_millis(75);

/// Order in which the victory jingle walks around the board.
pub const VICTORY_PATTERN: [Signal; 4] = [Signal(0), Signal(1), Signal(3), Signal(2)];

/// Presentation metadata for each signal, indexed by identifier.
pub const SIGNAL_PROFILES: [SignalProfile; 4] = [
    SignalProfile::new("Green", SignalColor::from_rgb(0x2f, 0x95, 0x32), 415),
    SignalProfile::new("Red", SignalColor::from_rgb(0xc8, 0x2a, 0x36), 310),
    SignalProfile::new("Yellow", SignalColor::from_rgb(0xff, 0xc1, 0x07), 252),
    SignalProfile::new("Blue", SignalColor::from_rgb(0x1e, 0x5a, 0xff), 209),
];

/// One of the four coloured buttons on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Signal(u8);

impl Signal {
    /// Every signal in identifier order.
    pub const ALL: [Signal; 4] = [Signal(0), Signal(1), Signal(2), Signal(3)];

    /// Number of distinct signals on the board.
    pub const COUNT: usize = 4;

    /// Returns the signal with the provided identifier, if it exists.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Numeric identifier of the signal.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Colour and tone metadata associated with the signal.
    #[must_use]
    pub const fn profile(self) -> &'static SignalProfile {
        &SIGNAL_PROFILES[self.0 as usize]
    }
}

impl TryFrom<u8> for Signal {
    type Error = SignalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(SignalError::OutOfRange { index: value })
    }
}

impl From<Signal> for u8 {
    fn from(signal: Signal) -> Self {
        signal.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name())
    }
}

/// Errors raised when converting raw identifiers into signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The identifier does not name one of the four signals.
    #[error("signal identifier {index} is outside 0..=3")]
    OutOfRange {
        /// Identifier that failed validation.
        index: u8,
    },
}

/// Colour used when rendering a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignalColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl SignalColor {
    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Name, colour and tone of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalProfile {
    name: &'static str,
    color: SignalColor,
    tone_hz: u16,
}

impl SignalProfile {
    const fn new(name: &'static str, color: SignalColor, tone_hz: u16) -> Self {
        Self {
            name,
            color,
            tone_hz,
        }
    }

    /// Human readable colour name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Colour used when the signal is rendered.
    #[must_use]
    pub const fn color(&self) -> SignalColor {
        self.color
    }

    /// Pitch of the tone played alongside the flash.
    #[must_use]
    pub const fn tone_hz(&self) -> u16 {
        self.tone_hz
    }
}

/// Full target order of signals for the current game.
///
/// A sequence always holds exactly [`MAX_ROUND_LENGTH`] signals; rounds only
/// ever expose a prefix of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Signal>", into = "Vec<Signal>")]
pub struct Sequence {
    signals: Vec<Signal>,
}

impl Sequence {
    /// Wraps the provided signals, rejecting anything but a full-length sequence.
    pub fn new(signals: Vec<Signal>) -> Result<Self, SequenceError> {
        if signals.len() != MAX_ROUND_LENGTH {
            return Err(SequenceError::InvalidLength {
                expected: MAX_ROUND_LENGTH,
                found: signals.len(),
            });
        }
        Ok(Self { signals })
    }

    /// Signal expected at the provided zero-based step.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Signal> {
        self.signals.get(index).copied()
    }

    /// Signals that make up a round of the provided length.
    ///
    /// Lengths beyond the sequence are clamped to the full sequence.
    #[must_use]
    pub fn prefix(&self, round_length: usize) -> &[Signal] {
        &self.signals[..round_length.min(self.signals.len())]
    }

    /// Iterator over every signal in order.
    pub fn iter(&self) -> impl Iterator<Item = Signal> + '_ {
        self.signals.iter().copied()
    }

    /// Number of signals in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Reports whether the sequence is empty, which never happens once built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl TryFrom<Vec<Signal>> for Sequence {
    type Error = SequenceError;

    fn try_from(signals: Vec<Signal>) -> Result<Self, Self::Error> {
        Self::new(signals)
    }
}

impl From<Sequence> for Vec<Signal> {
    fn from(sequence: Sequence) -> Self {
        sequence.signals
    }
}

/// Errors raised when assembling a [`Sequence`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The sequence does not hold exactly the required number of signals.
    #[error("sequence must hold {expected} signals, found {found}")]
    InvalidLength {
        /// Required number of signals.
        expected: usize,
        /// Number of signals provided.
        found: usize,
    },
}

/// Lifecycle phase of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No round is in progress; waiting for a start.
    Idle,
    /// The machine is playing the current round back to the player.
    Presenting,
    /// The player is reproducing the round.
    AwaitingInput,
    /// The player reproduced the round.
    RoundWon,
    /// The player clicked the wrong signal.
    RoundLost,
}

impl Phase {
    /// Reports whether player clicks are evaluated in this phase.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::AwaitingInput)
    }
}

/// Text shown on the step counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CounterText {
    /// One-based number of steps in the round being presented.
    Step(usize),
    /// Feedback after a wrong click.
    WrongClick,
    /// Feedback after a won round.
    Won,
}

impl fmt::Display for CounterText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(step) => write!(f, "{step:02}"),
            Self::WrongClick => f.write_str("!!"),
            Self::Won => f.write_str(":)"),
        }
    }
}

/// Caption of the start button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StartLabel {
    /// No game has been started yet.
    Start,
    /// A game was started at least once.
    Restart,
}

impl fmt::Display for StartLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("Start"),
            Self::Restart => f.write_str("Restart"),
        }
    }
}

/// Reasons a player click is dropped without touching game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoredClick {
    /// The identifier does not name a signal.
    UnknownSignal {
        /// Raw identifier delivered by the adapter.
        signal_id: u8,
    },
    /// Input is locked while the machine presents or resolves a round.
    InputLocked,
}

/// Result of checking a click against the expected step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// The click matched and more steps remain in the round.
    Correct {
        /// Signal the player clicked.
        signal: Signal,
    },
    /// The click matched the final step of the round.
    RoundComplete {
        /// Signal the player clicked.
        signal: Signal,
    },
    /// The click did not match the expected step.
    Wrong {
        /// Signal the player clicked.
        signal: Signal,
        /// Signal the round expected.
        expected: Signal,
    },
}

/// Work deferred to a later instant on the world's clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    /// Reset progress, generate a sequence and present the first round.
    BeginGame,
    /// Flash a single signal.
    Activate {
        /// Signal to flash.
        signal: Signal,
    },
    /// Unlock input once a presentation finished.
    OpenInput,
    /// Present the current round.
    PresentRound,
    /// Begin the victory jingle.
    StartVictory,
}

/// How often the victory jingle is played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Celebration {
    /// Play the jingle after every won round.
    #[default]
    EveryRound,
    /// Play the jingle only after the final round.
    FinalRound,
}

/// Player facing configuration for a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Whether strict mode is enabled when the session begins.
    pub strict_mode: bool,
    /// When the victory jingle is played.
    pub celebration: Celebration,
    /// Seed for sequence generation; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests a fresh game, cancelling anything still scheduled.
    Start,
    /// Flips strict mode.
    ToggleStrict,
    /// Delivers a raw player click; identifiers are validated by the world.
    ClickSignal {
        /// Identifier reported by the adapter.
        signal_id: u8,
    },
    /// Advances the world clock, firing deferred work that falls due.
    Tick {
        /// Upper bound of simulated time to advance.
        dt: Duration,
    },
    /// Installs a freshly generated sequence.
    InstallSequence {
        /// Sequence to install.
        sequence: Sequence,
    },
    /// Starts presenting the current round at the provided tempo.
    BeginPresentation {
        /// Interval between presented steps.
        tempo: Duration,
    },
    /// Defers an action relative to the current clock reading.
    Schedule {
        /// Delay before the action fires.
        delay: Duration,
        /// Action to perform.
        action: DeferredAction,
    },
    /// Applies the verdict for the latest click.
    ResolveClick {
        /// Verdict reached by the input validator.
        outcome: ClickOutcome,
    },
    /// Resets the round length after a strict-mode failure.
    ResetProgress,
    /// Grows the round by one step.
    AdvanceRound,
    /// Marks the game as finished after the final round.
    CompleteGame,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the world clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed.
        dt: Duration,
    },
    /// Announces that the game entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Requests the start button caption be updated.
    StartLabelChanged {
        /// Caption to show.
        label: StartLabel,
    },
    /// Announces that strict mode was toggled.
    StrictModeChanged {
        /// Whether strict mode is now enabled.
        enabled: bool,
    },
    /// Asks the sequence generator for a fresh sequence.
    SequenceRequested,
    /// Asks the difficulty controller to schedule the current round.
    RoundRequested {
        /// Steps in the round about to be presented.
        round_length: usize,
        /// Tempo used by the previous presentation.
        tempo: Duration,
    },
    /// Announces that the presentation tempo became faster.
    TempoChanged {
        /// New interval between presented steps.
        tempo: Duration,
    },
    /// Announces that the round presentation began.
    PresentationStarted {
        /// Steps in the round being presented.
        round_length: usize,
        /// Interval between presented steps.
        tempo: Duration,
    },
    /// Requests the counter display be updated.
    CounterChanged {
        /// Text to show.
        text: CounterText,
    },
    /// Requests a signal be lit and its tone played.
    SignalActivated {
        /// Signal to activate.
        signal: Signal,
        /// How long the signal stays lit.
        duration: Duration,
    },
    /// Announces that the player may now reproduce the round.
    InputOpened,
    /// Reports that a click was dropped.
    ClickIgnored {
        /// Why the click was dropped.
        reason: IgnoredClick,
    },
    /// Reports a click accepted for validation.
    SignalClicked {
        /// Signal the player clicked.
        signal: Signal,
    },
    /// Confirms that the player matched a step and moved on.
    CursorAdvanced {
        /// Zero-based step the player must match next.
        cursor: usize,
    },
    /// Reports that the player clicked the wrong signal.
    RoundLost {
        /// Whether strict mode was active when the round was lost.
        strict_mode: bool,
    },
    /// Reports that the player reproduced the whole round.
    RoundWon {
        /// Steps in the round that was won.
        round_length: usize,
        /// Whether the round covered the entire sequence.
        final_round: bool,
    },
    /// Confirms that the round grew by one step.
    RoundAdvanced {
        /// Steps in the next round.
        round_length: usize,
    },
    /// Confirms that strict mode reset the player's progress.
    ProgressReset,
    /// Reports that the final round was won and the game is over.
    GameCompleted,
    /// Requests the victory jingle be played.
    VictoryStarted,
}

/// Read-only view of the state the input validator needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundView {
    /// Signal expected at the cursor, if a sequence is installed.
    pub expected: Option<Signal>,
    /// Zero-based step the player must match next.
    pub cursor: usize,
    /// Steps in the current round.
    pub round_length: usize,
}

/// Immutable snapshot of the whole game state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Installed sequence, if a game was started.
    pub sequence: Option<Sequence>,
    /// Steps in the current round.
    pub round_length: usize,
    /// Zero-based step the player must match next.
    pub cursor: usize,
    /// Whether strict mode is enabled.
    pub strict_mode: bool,
    /// Interval between presented steps.
    pub tempo: Duration,
    /// Whether clicks are currently dropped.
    pub input_locked: bool,
    /// Current lifecycle phase.
    pub phase: Phase,
    /// Whether the final round was won.
    pub completed: bool,
}

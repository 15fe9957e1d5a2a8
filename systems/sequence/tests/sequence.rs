use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simon_core::{Command, Event, Signal, MAX_ROUND_LENGTH};
use simon_system_sequence::{generate, Config, SequenceGenerator};

#[test]
fn answers_each_request_with_an_install_command() {
    let mut generator = SequenceGenerator::new(Config::seeded(0x5eed));
    let mut commands = Vec::new();

    generator.handle(
        &[
            Event::SequenceRequested,
            Event::InputOpened,
            Event::SequenceRequested,
        ],
        &mut commands,
    );

    assert_eq!(commands.len(), 2, "one install per request");
    for command in &commands {
        match command {
            Command::InstallSequence { sequence } => assert_eq!(sequence.len(), MAX_ROUND_LENGTH),
            other => panic!("unexpected command emitted: {other:?}"),
        }
    }
    assert_ne!(
        commands[0], commands[1],
        "consecutive requests should draw fresh sequences"
    );
}

#[test]
fn ignores_unrelated_events() {
    let mut generator = SequenceGenerator::default();
    let mut commands = Vec::new();
    generator.handle(&[Event::InputOpened, Event::GameCompleted], &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn every_signal_appears_over_many_draws() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let signals = generate(&mut rng, 400);
    for signal in Signal::ALL {
        assert!(
            signals.contains(&signal),
            "{signal} never drawn in 400 samples"
        );
    }
}

proptest! {
    #[test]
    fn generated_sequences_are_full_length_and_in_range(seed in any::<u64>()) {
        let mut generator = SequenceGenerator::new(Config::seeded(seed));
        let sequence = generator.generate_sequence();
        prop_assert_eq!(sequence.len(), MAX_ROUND_LENGTH);
        for signal in sequence.iter() {
            prop_assert!(signal.index() < 4);
        }
    }

    #[test]
    fn generate_draws_exactly_the_requested_count(seed in any::<u64>(), length in 0usize..64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        prop_assert_eq!(generate(&mut rng, length).len(), length);
    }
}

//! Chain integration tests through the public API.

use infinite_monkeys::core::chain::{load_chain, save_chain, Chain, ChainError};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn numbers_memory_1_table() {
    let chain = Chain::with_training(1, [1u32, 1, 2, 1]).unwrap();

    let mut states: Vec<(Vec<u32>, Vec<u32>)> = chain
        .states()
        .map(|state| (state.to_vec(), chain.get(state).unwrap().to_vec()))
        .collect();
    states.sort();

    assert_eq!(states, vec![(vec![1], vec![1, 2]), (vec![2], vec![1])]);
}

#[test]
fn numbers_memory_2_incremental_table() {
    let mut chain = Chain::new(2).unwrap();
    for run in [
        [1u32, 1, 1],
        [1, 1, 2],
        [1, 2, 2],
        [1, 2, 1],
        [1, 2, 1],
        [1, 2, 1],
        [2, 1, 1],
    ] {
        chain.train(run).unwrap();
    }

    let mut states: Vec<(Vec<u32>, Vec<u32>)> = chain
        .states()
        .map(|state| (state.to_vec(), chain.get(state).unwrap().to_vec()))
        .collect();
    states.sort();

    assert_eq!(
        states,
        vec![
            (vec![1, 1], vec![1, 2]),
            (vec![1, 2], vec![2, 1, 1, 1]),
            (vec![2, 1], vec![1]),
        ]
    );
    assert_eq!(chain.transition_count(), 7);
}

#[test]
fn walk_follows_recorded_transitions() {
    let words = "a b c a b d a c b a d c".split(' ');
    let chain = Chain::with_training(1, words).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let walked: Vec<&str> = chain.walk(None, &mut rng).take(200).collect();
    assert!(!walked.is_empty());
    for pair in walked.windows(2) {
        assert!(chain.get(&pair[..1]).unwrap().contains(&pair[1]));
    }
}

#[test]
fn walk_restarts_fresh() {
    let chain = Chain::with_training(1, [1u32, 2, 3]).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let first: Vec<u32> = chain.walk(Some(vec![1]), &mut rng).collect();
    let second: Vec<u32> = chain.walk(Some(vec![1]), &mut rng).collect();
    assert_eq!(first, vec![2, 3]);
    assert_eq!(second, vec![2, 3]);
}

#[test]
fn walk_with_wrong_length_start_is_empty() {
    let chain = Chain::with_training(2, [1u32, 2, 3, 4]).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(chain.walk(Some(vec![1]), &mut rng).count(), 0);
}

#[test]
fn choice_propagates_missing_state() {
    let chain = Chain::with_training(2, ["to", "be", "or", "not"]).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    assert_eq!(*chain.choice(&["to", "be"], &mut rng).unwrap(), "or");
    assert!(matches!(
        chain.choice(&["or", "not"], &mut rng),
        Err(ChainError::StateNotFound)
    ));
}

#[test]
fn events_cover_states_and_transitions() {
    let chain = Chain::with_training(2, ["to", "be", "or", "not", "to", "be"]).unwrap();
    let mut events: Vec<&str> = chain.events().into_iter().collect();
    events.sort();
    assert_eq!(events, vec!["be", "not", "or", "to"]);
    assert_eq!(chain.len(), 4);
}

#[test]
fn string_chain_survives_ron_round_trip() {
    let words = "Why day is day, night night, and time is time,"
        .split_whitespace()
        .map(str::to_owned);
    let chain = Chain::with_training(2, words).unwrap();
    let path = std::path::PathBuf::from("target/test_string_chain.ron");

    save_chain(&chain, &path).unwrap();
    let loaded: Chain<String> = load_chain(&path).unwrap();

    assert_eq!(loaded, chain);
    assert_eq!(loaded.memory(), 2);

    // Cleanup
    let _ = std::fs::remove_file(&path);
}

#[test]
fn loading_zero_memory_chain_fails() {
    let path = std::path::PathBuf::from("target/test_zero_memory_chain.ron");
    std::fs::write(&path, "(memory: 0, transitions: {})").unwrap();

    let result: Result<Chain<u32>, ChainError> = load_chain(&path);
    assert!(matches!(result, Err(ChainError::InvalidMemory(0))));

    let _ = std::fs::remove_file(&path);
}

// Replay integration tests against logged games in tests/fixtures

use come_slither::config::Config;
use come_slither::replay::ReplayEngine;
use come_slither::types::Direction;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn engine() -> ReplayEngine {
    ReplayEngine::new(Config::default_hardcoded(), false)
}

#[test]
fn test_load_sample_game() {
    let entries = engine().load_log_file(fixture("sample_game.jsonl")).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].turn, 3);
    assert_eq!(entries[0].you_id, "me");
    assert_eq!(entries[2].rationale, "NO LEGAL MOVE");
}

#[test]
fn test_missing_log_file_is_an_error() {
    assert!(engine().load_log_file(fixture("does_not_exist.jsonl")).is_err());
}

#[test]
fn test_replay_reproduces_forced_and_tail_moves() {
    let engine = engine();
    let entries = engine.load_log_file(fixture("sample_game.jsonl")).unwrap();
    let results = engine.replay_turns(&entries, &[3, 5]).unwrap();

    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(
            result.matches,
            "turn {}: logged {}, replayed {} ({})",
            result.turn,
            result.original_move.as_str(),
            result.replayed_move.as_str(),
            result.replayed_rationale
        );
    }
    assert_eq!(results[1].replayed_rationale, "NO LEGAL MOVE");
}

#[test]
fn test_replay_all_covers_every_turn() {
    let engine = engine();
    let entries = engine.load_log_file(fixture("sample_game.jsonl")).unwrap();
    let results = engine.replay_all(&entries);

    assert_eq!(results.len(), entries.len());
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 3);
    assert!(stats.matches >= 2);
}

#[test]
fn test_food_turn_moves_toward_food() {
    let engine = engine();
    let entries = engine.load_log_file(fixture("sample_game.jsonl")).unwrap();
    let results = engine.replay_turns(&entries, &[4]).unwrap();

    assert_eq!(results[0].replayed_rationale, "A* BEST PATH TO FOOD");
    assert!(results[0].replayed_move == Direction::Up || results[0].replayed_move == Direction::Right);
}

#[test]
fn test_validate_logged_moves() {
    let engine = engine();
    let entries = engine.load_log_file(fixture("sample_game.jsonl")).unwrap();

    let expected = vec![
        (3, vec![Direction::Right]),
        (4, vec![Direction::Up, Direction::Right]),
        (5, vec![Direction::Down]),
    ];
    assert!(engine.validate_expected_moves(&entries, &expected).is_ok());

    let wrong = vec![(5, vec![Direction::Up])];
    assert!(engine.validate_expected_moves(&entries, &wrong).is_err());
}

#[test]
fn test_legacy_log_without_snake_id() {
    let engine = engine();
    let entries = engine.load_log_file(fixture("legacy_game.jsonl")).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].acting_snake_id().unwrap(), "our-snake");

    let results = engine.replay_all(&entries);
    assert_eq!(results.len(), 1);
    assert!(results[0].matches);
}

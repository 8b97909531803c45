use crate::config::rules::{MatchConfig, ScoreMode};
use crate::domain::scoring::{apply_round_scoring, match_winner, round_points, trick_points};
use crate::domain::state::{MatchState, Phase, TeamId};
use crate::domain::Card;

fn plays(tokens: [&str; 4]) -> Vec<(u8, Card)> {
    tokens
        .iter()
        .enumerate()
        .map(|(seat, tok)| (seat as u8, tok.parse().expect("valid card token")))
        .collect()
}

#[test]
fn trick_points_sums_the_point_table() {
    // A + 10 + K + 7 = 11 + 10 + 4 + 0
    assert_eq!(trick_points(&plays(["AS", "TS", "KH", "7D"])), 25);
    // Four zero-point cards
    assert_eq!(trick_points(&plays(["7S", "8S", "9H", "8D"])), 0);
    // Q + J = 3 + 2
    assert_eq!(trick_points(&plays(["QS", "JH", "7C", "9D"])), 5);
}

#[test]
fn abnat_mode_is_identity() {
    for abnat in [0, 11, 65, 130] {
        assert_eq!(round_points(abnat, ScoreMode::Abnat), abnat);
    }
}

#[test]
fn san_mode_rounds_to_nearest_ten_then_doubles() {
    assert_eq!(round_points(0, ScoreMode::San), 0);
    assert_eq!(round_points(64, ScoreMode::San), 12); // 60
    assert_eq!(round_points(66, ScoreMode::San), 14); // 70
    assert_eq!(round_points(130, ScoreMode::San), 26);
}

#[test]
fn san_mode_ties_round_to_even() {
    // 65 -> 60 (6 is even), 75 -> 80 (7 is odd)
    assert_eq!(round_points(65, ScoreMode::San), 12);
    assert_eq!(round_points(75, ScoreMode::San), 16);
}

fn round_end_state(abnat: [u16; 2], mode: ScoreMode) -> MatchState {
    let config = MatchConfig {
        score_mode: mode,
        ..MatchConfig::default()
    };
    let mut state = MatchState::new(7, config);
    state.round_no = 1;
    state.round.abnat = abnat;
    state.phase = Phase::RoundEnd;
    state
}

#[test]
fn apply_round_scoring_accumulates_totals() {
    let mut state = round_end_state([90, 40], ScoreMode::Abnat);
    state.scores = [10, 20];

    let added = apply_round_scoring(&mut state);
    assert_eq!(added, [90, 40]);
    assert_eq!(state.scores, [100, 60]);
}

#[test]
fn apply_round_scoring_requires_round_end() {
    let mut state = round_end_state([90, 40], ScoreMode::Abnat);
    state.phase = Phase::Trick { trick_no: 3 };

    let added = apply_round_scoring(&mut state);
    assert_eq!(added, [0, 0]);
    assert_eq!(state.scores, [0, 0]);
}

#[test]
fn apply_round_scoring_in_san_mode_converts() {
    let mut state = round_end_state([90, 40], ScoreMode::San);
    let added = apply_round_scoring(&mut state);
    assert_eq!(added, [18, 8]);
    assert_eq!(state.scores, [18, 8]);
}

#[test]
fn match_winner_requires_target_and_strict_maximum() {
    let mut state = round_end_state([0, 0], ScoreMode::Abnat);

    state.scores = [151, 130];
    assert_eq!(match_winner(&state), None);

    state.scores = [155, 130];
    assert_eq!(match_winner(&state), Some(TeamId::A));

    state.scores = [140, 152];
    assert_eq!(match_winner(&state), Some(TeamId::B));

    // Both across the line with equal totals: play on.
    state.scores = [160, 160];
    assert_eq!(match_winner(&state), None);
}

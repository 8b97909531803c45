//! Builders for mid-round match states used across domain tests.

use std::collections::HashSet;

use crate::config::rules::MatchConfig;
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::dealing::full_deck;
use crate::domain::rules::HAND_SIZE;
use crate::domain::state::{MatchState, Phase, RoundState, Seat};
use crate::domain::Card;

/// Build a state mid-round with the given equal-sized hands and the leader
/// on turn. Cards not in any hand are placed in `captured` so the 32-card
/// partition audit holds; `trick_no` is derived from the hand size.
pub fn state_with_hands(hands: [Vec<Card>; 4], leader: Seat) -> MatchState {
    state_with_hands_and_config(hands, leader, MatchConfig::default())
}

pub fn state_with_hands_and_config(
    hands: [Vec<Card>; 4],
    leader: Seat,
    config: MatchConfig,
) -> MatchState {
    let hand_len = hands[0].len();
    assert!(hands.iter().all(|h| h.len() == hand_len), "hands must be equal-sized");

    let held: HashSet<Card> = hands.iter().flatten().copied().collect();
    assert_eq!(held.len(), hand_len * 4, "hands must not share cards");

    let mut state = MatchState::new(7, config);
    state.round_no = 1;
    state.round = RoundState::empty();
    state.round.captured = full_deck().into_iter().filter(|c| !held.contains(c)).collect();
    state.round.trick_no = (HAND_SIZE - hand_len + 1) as u8;
    state.hands = hands;
    state.round_first_leader = leader;
    state.leader = Some(leader);
    state.turn = Some(leader);
    state.phase = Phase::Trick {
        trick_no: state.round.trick_no,
    };
    state
}

/// Parse four hands from card tokens.
pub fn hands_from_tokens(tokens: [&[&str]; 4]) -> [Vec<Card>; 4] {
    let parse =
        |toks: &[&str]| try_parse_cards(toks.iter().copied()).expect("valid card tokens");
    [
        parse(tokens[0]),
        parse(tokens[1]),
        parse(tokens[2]),
        parse(tokens[3]),
    ]
}

use crate::domain::state::{audit_card_partition, Phase, TeamId};
use crate::domain::test_state_helpers::{hands_from_tokens, state_with_hands};
use crate::domain::tricks::{legal_moves, play_card};
use crate::errors::domain::{DomainError, ValidationKind};

fn card(token: &str) -> crate::domain::Card {
    token.parse().expect("valid card token")
}

/// A full deal where seat 0 holds the only ace of spades and seat 1 still
/// holds a spade, so every rejection path is reachable from trick one.
fn mixed_deal() -> [Vec<crate::domain::Card>; 4] {
    hands_from_tokens([
        &["AS", "7H", "8H", "9H", "TH", "JH", "QH", "KH"],
        &["7S", "AH", "7D", "8D", "9D", "TD", "JD", "QD"],
        &["8S", "KD", "AD", "7C", "8C", "9C", "TC", "JC"],
        &["9S", "TS", "JS", "QS", "KS", "QC", "KC", "AC"],
    ])
}

#[test]
fn out_of_turn_is_rejected_without_mutation() {
    let mut state = state_with_hands(mixed_deal(), 0);
    let before = state.clone();

    let err = play_card(&mut state, 2, card("8S")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));

    assert_eq!(state.hands, before.hands);
    assert_eq!(state.round, before.round);
    assert_eq!(state.turn, before.turn);
}

#[test]
fn card_not_held_is_rejected() {
    let mut state = state_with_hands(mixed_deal(), 0);
    // KD belongs to seat 2.
    let err = play_card(&mut state, 0, card("KD")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CardNotHeld));
}

#[test]
fn must_follow_suit_while_holding_lead() {
    let mut state = state_with_hands(mixed_deal(), 0);
    play_card(&mut state, 0, card("AS")).unwrap();

    // Seat 1 holds 7S; the ace of hearts is an illegal discard.
    let before = state.clone();
    let err = play_card(&mut state, 1, card("AH")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::SuitViolation));
    assert_eq!(state.hands, before.hands);
    assert_eq!(state.round.trick_plays, before.round.trick_plays);

    // The spade goes through.
    play_card(&mut state, 1, card("7S")).unwrap();
    assert_eq!(state.round.trick_plays.len(), 2);
}

#[test]
fn trick_resolves_to_highest_lead_suit_card() {
    let mut state = state_with_hands(mixed_deal(), 0);
    play_card(&mut state, 0, card("AS")).unwrap();
    play_card(&mut state, 1, card("7S")).unwrap();
    play_card(&mut state, 2, card("8S")).unwrap();
    let result = play_card(&mut state, 3, card("9S")).unwrap();

    assert!(result.trick_completed);
    assert_eq!(result.trick_winner, Some(0));
    assert_eq!(result.trick_points, 11); // A + three zero-point spades
    assert!(!result.is_last_trick);
    assert!(!result.round_complete);

    assert_eq!(state.round.abnat[TeamId::A.index()], 11);
    assert_eq!(state.round.tricks_taken[0], 1);
    assert_eq!(state.round.captured.len(), 4);
    assert!(state.round.trick_plays.is_empty());
    assert_eq!(state.round.trick_lead, None);

    // Winner leads the next trick.
    assert_eq!(state.turn, Some(0));
    assert_eq!(state.leader, Some(0));
    assert_eq!(state.phase, Phase::Trick { trick_no: 2 });
}

#[test]
fn ten_outranks_king_and_offsuit_ace_never_wins() {
    // Two-card hands: trick 7 then the last trick.
    let hands = hands_from_tokens([
        &["KS", "7H"],
        &["TS", "8H"],
        &["7S", "9H"],
        &["8S", "TH"],
    ]);
    let mut state = state_with_hands(hands, 0);
    assert_eq!(state.phase, Phase::Trick { trick_no: 7 });

    play_card(&mut state, 0, card("KS")).unwrap();
    play_card(&mut state, 1, card("TS")).unwrap();
    play_card(&mut state, 2, card("7S")).unwrap();
    let trick7 = play_card(&mut state, 3, card("8S")).unwrap();

    // San strength order: the ten takes the king.
    assert_eq!(trick7.trick_winner, Some(1));
    assert_eq!(trick7.trick_points, 14);
    assert_eq!(state.turn, Some(1));

    play_card(&mut state, 1, card("8H")).unwrap();
    play_card(&mut state, 2, card("9H")).unwrap();
    play_card(&mut state, 3, card("TH")).unwrap();
    let trick8 = play_card(&mut state, 0, card("7H")).unwrap();

    assert_eq!(trick8.trick_winner, Some(3));
    assert_eq!(trick8.trick_points, 10);
    assert!(trick8.is_last_trick);
    assert!(trick8.round_complete);

    // Team B took both tricks; the last one carries the 10-point bonus.
    assert_eq!(state.round.abnat[TeamId::B.index()], 14 + 10 + 10);
    assert_eq!(state.round.abnat[TeamId::A.index()], 0);
    assert_eq!(state.phase, Phase::RoundEnd);
    assert_eq!(state.turn, None);
    assert_eq!(state.leader, Some(3));
}

#[test]
fn void_seat_may_discard_anything() {
    // Single-card hands: the eighth trick.
    let hands = hands_from_tokens([&["7S"], &["AH"], &["8S"], &["TH"]]);
    let mut state = state_with_hands(hands, 0);
    assert_eq!(state.phase, Phase::Trick { trick_no: 8 });

    play_card(&mut state, 0, card("7S")).unwrap();
    // Seat 1 has no spades: any card is legal.
    play_card(&mut state, 1, card("AH")).unwrap();
    play_card(&mut state, 2, card("8S")).unwrap();
    let result = play_card(&mut state, 3, card("TH")).unwrap();

    // Off-suit ace never wins; 8S is the best spade.
    assert_eq!(result.trick_winner, Some(2));
    assert_eq!(result.trick_points, 21);
    assert!(result.round_complete);
    assert_eq!(state.round.abnat[TeamId::A.index()], 21 + 10);
    assert!(state.is_round_complete());
}

#[test]
fn play_is_rejected_after_round_end() {
    let hands = hands_from_tokens([&["7S"], &["AH"], &["8S"], &["TH"]]);
    let mut state = state_with_hands(hands, 0);
    for (seat, token) in [(0u8, "7S"), (1, "AH"), (2, "8S"), (3, "TH")] {
        play_card(&mut state, seat, card(token)).unwrap();
    }
    assert_eq!(state.phase, Phase::RoundEnd);

    let err = play_card(&mut state, 2, card("8S")).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn legal_moves_outside_trick_phase_is_empty() {
    let mut state = state_with_hands(mixed_deal(), 0);
    state.phase = Phase::RoundEnd;
    assert!(legal_moves(&state, 0).is_empty());
}

#[test]
fn legal_moves_for_void_seat_is_whole_hand() {
    let mut state = state_with_hands(mixed_deal(), 0);
    play_card(&mut state, 0, card("AS")).unwrap();
    play_card(&mut state, 1, card("7S")).unwrap();
    play_card(&mut state, 2, card("8S")).unwrap();
    // Seat 3 still holds spades, so only spades are legal.
    let legal = legal_moves(&state, 3);
    assert!(legal.iter().all(|c| c.suit == crate::domain::Suit::Spades));
    assert_eq!(legal.len(), 5);
}

#[test]
fn partition_audit_catches_corruption() {
    let state = state_with_hands(mixed_deal(), 0);
    audit_card_partition(&state).unwrap();

    // Duplicate a card.
    let mut corrupted = state.clone();
    corrupted.round.captured.push(card("AS"));
    assert!(matches!(
        audit_card_partition(&corrupted),
        Err(DomainError::Invariant(_))
    ));

    // Lose a card.
    let mut corrupted = state;
    corrupted.hands[0].pop();
    assert!(matches!(
        audit_card_partition(&corrupted),
        Err(DomainError::Invariant(_))
    ));
}

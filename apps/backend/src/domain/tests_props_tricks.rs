/// Property-based tests for trick resolution and card conservation
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::domain::dealing::deal_hands;
use crate::domain::rules::{DECK_POINTS, DECK_SIZE, SEATS, TRICKS_PER_ROUND};
use crate::domain::state::{audit_card_partition, Phase, RoundState, Seat};
use crate::domain::test_state_helpers::state_with_hands;
use crate::domain::tricks::{legal_moves, play_card, resolve_current_trick};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: a full round of random-but-legal play conserves the 32-card
    /// partition at every step, resolves exactly eight tricks, and accounts
    /// for all 120 card points plus the last-trick bonus.
    #[test]
    fn prop_full_round_conserves_cards_and_points(
        deal_seed in any::<u64>(),
        pick_seed in any::<u64>(),
    ) {
        let mut state = state_with_hands(deal_hands(deal_seed), 0);
        let mut rng = ChaCha12Rng::seed_from_u64(pick_seed);
        let mut tricks_resolved = 0u8;

        for _ in 0..DECK_SIZE {
            let Some(turn) = state.turn else {
                return Err(TestCaseError::fail("turn unset mid-round"));
            };
            let legal = legal_moves(&state, turn);
            prop_assert!(!legal.is_empty(), "on-turn seat must have a legal play");
            let card = legal[rng.random_range(0..legal.len())];

            let result = play_card(&mut state, turn, card)
                .map_err(|e| TestCaseError::fail(format!("legal play rejected: {e}")))?;
            audit_card_partition(&state)
                .map_err(|e| TestCaseError::fail(format!("partition broken: {e}")))?;

            if result.trick_completed {
                tricks_resolved += 1;
            }
            if result.round_complete {
                break;
            }
        }

        prop_assert_eq!(tricks_resolved, TRICKS_PER_ROUND);
        prop_assert_eq!(state.phase, Phase::RoundEnd);
        prop_assert!(state.is_round_complete());
        prop_assert_eq!(state.round.captured.len(), DECK_SIZE);

        let bonus = state.config.last_trick_bonus;
        prop_assert_eq!(
            state.round.abnat[0] + state.round.abnat[1],
            DECK_POINTS + bonus,
            "all card points plus the last-trick bonus must be captured"
        );
    }

    /// Property: the trick winner holds the strongest lead-suit card.
    #[test]
    fn prop_trick_winner_holds_best_lead_card(
        cards in test_gens::four_distinct_cards(),
        leader in 0u8..4,
    ) {
        let mut round = RoundState::empty();
        for (i, &card) in cards.iter().enumerate() {
            let seat = (leader as usize + i) % SEATS;
            round.trick_plays.push((seat as Seat, card));
        }
        let lead = cards[0].suit;
        round.trick_lead = Some(lead);

        let winner = resolve_current_trick(&round)
            .ok_or_else(|| TestCaseError::fail("complete trick must resolve"))?;

        let expected = round
            .trick_plays
            .iter()
            .filter(|(_, c)| c.suit == lead)
            .max_by_key(|(_, c)| c.rank)
            .map(|&(seat, _)| seat);
        prop_assert_eq!(Some(winner), expected);

        // The winner always followed the lead suit.
        let (_, winning_card) = round
            .trick_plays
            .iter()
            .copied()
            .find(|&(seat, _)| seat == winner)
            .ok_or_else(|| TestCaseError::fail("winner must be among the plays"))?;
        prop_assert_eq!(winning_card.suit, lead);
    }

    /// Property: an incomplete trick never resolves.
    #[test]
    fn prop_incomplete_trick_does_not_resolve(
        cards in test_gens::unique_cards_up_to(3),
    ) {
        let mut round = RoundState::empty();
        for (i, &card) in cards.iter().enumerate() {
            round.trick_plays.push((i as Seat, card));
        }
        round.trick_lead = cards.first().map(|c| c.suit);
        prop_assert_eq!(resolve_current_trick(&round), None);
    }
}

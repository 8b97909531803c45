//! Deterministic card dealing logic.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::domain::rules::{DECK_SIZE, HAND_SIZE, SEATS};
use crate::domain::{Card, Rank, Suit};

static DECK_TEMPLATE: Lazy<Vec<Card>> = Lazy::new(|| {
    let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
    let ranks = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ten,
        Rank::Ace,
    ];

    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in suits {
        for rank in ranks {
            deck.push(Card { suit, rank });
        }
    }
    deck
});

/// The full 32-card deck (7 through Ace, four suits) in standard order.
pub fn full_deck() -> Vec<Card> {
    DECK_TEMPLATE.clone()
}

/// Deal four 8-card hands deterministically from an RNG seed.
///
/// The whole deck is consumed; there is no remainder. Hands are sorted for
/// convenience. Same seed, same hands — the seed is derived per round from
/// the match seed (see `seed_derivation`), which keeps every deal
/// reproducible for replays and tests.
pub fn deal_hands(seed: u64) -> [Vec<Card>; SEATS] {
    let mut deck = full_deck();
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands: [Vec<Card>; SEATS] = Default::default();
    for (seat, hand_slot) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        let mut hand = deck[start..start + HAND_SIZE].to_vec();
        hand.sort();
        *hand_slot = hand;
    }
    hands
}

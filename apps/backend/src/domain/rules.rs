//! Fixed structural rules of the game.

/// Four fixed seats.
pub const SEATS: usize = 4;

/// Cards per hand; the 32-card deck is consumed entirely by one deal.
pub const HAND_SIZE: usize = 8;

/// Size of the deck (7 through Ace, four suits).
pub const DECK_SIZE: usize = SEATS * HAND_SIZE;

/// Tricks per round; every hand is exhausted exactly at the last trick.
pub const TRICKS_PER_ROUND: u8 = HAND_SIZE as u8;

/// Total card points in a deal: (11 + 10 + 4 + 3 + 2) per suit, four suits.
pub const DECK_POINTS: u16 = 120;

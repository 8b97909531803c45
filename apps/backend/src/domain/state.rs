use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::rules::MatchConfig;
use crate::domain::rules::{DECK_SIZE, SEATS};
use crate::domain::{Card, Suit};
use crate::errors::domain::DomainError;

pub type Seat = u8; // 0..=3

/// Fixed team partition: seats 0 and 2 versus seats 1 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub fn index(self) -> usize {
        match self {
            TeamId::A => 0,
            TeamId::B => 1,
        }
    }

    pub fn seats(self) -> [Seat; 2] {
        match self {
            TeamId::A => [0, 2],
            TeamId::B => [1, 3],
        }
    }
}

#[inline]
pub fn team_of(seat: Seat) -> TeamId {
    if seat % 2 == 0 {
        TeamId::A
    } else {
        TeamId::B
    }
}

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % SEATS as Seat
}

/// Room lifecycle phases.
///
/// `Dealing` and `RoundEnd` only exist inside a guarded mutation; by the
/// time the lock is released the room has settled into `Trick` or
/// `MatchEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Fewer than four seats bound and ready.
    Waiting,
    /// Shuffling and dealing a fresh round.
    Dealing,
    /// Playing tricks; `trick_no` is 1-based.
    Trick { trick_no: u8 },
    /// Round scoring in progress.
    RoundEnd,
    /// A team reached the target score. Terminal.
    MatchEnd,
}

/// Per-round state: the live trick plus this round's tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    /// Ordered plays for the current trick (who, card).
    pub trick_plays: Vec<(Seat, Card)>,
    /// Lead suit for the current trick (suit of the first play).
    pub trick_lead: Option<Suit>,
    /// Current trick number, 1-based.
    pub trick_no: u8,
    /// Cards captured in resolved tricks this round.
    pub captured: Vec<Card>,
    /// Card points (abnat) captured per team this round, last-trick bonus
    /// included once awarded.
    pub abnat: [u16; 2],
    /// Tricks taken per seat this round.
    pub tricks_taken: [u8; SEATS],
}

impl RoundState {
    pub fn empty() -> Self {
        Self {
            trick_plays: Vec::with_capacity(SEATS),
            trick_lead: None,
            trick_no: 1,
            captured: Vec::with_capacity(DECK_SIZE),
            abnat: [0; 2],
            tricks_taken: [0; SEATS],
        }
    }
}

/// Entire match container, sufficient for pure domain operations.
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Current phase.
    pub phase: Phase,
    /// Round number (1-based; 0 before the first deal).
    pub round_no: u16,
    /// Players' hands.
    pub hands: [Vec<Card>; SEATS],
    /// Seat expected to act.
    /// - Some(seat) while a trick is in progress
    /// - None when nobody can act (Dealing, RoundEnd, MatchEnd)
    pub turn: Option<Seat>,
    /// Seat that leads (or led) the current trick.
    pub leader: Option<Seat>,
    /// Seat that led the first trick of the current round (rotation policy).
    pub round_first_leader: Seat,
    /// Cumulative team scores across rounds.
    pub scores: [u16; 2],
    /// Per-round container.
    pub round: RoundState,
    /// Base RNG seed; every round's deal derives from it.
    pub seed: i64,
    /// Rules this match runs under.
    pub config: MatchConfig,
}

impl MatchState {
    pub fn new(seed: i64, config: MatchConfig) -> Self {
        Self {
            phase: Phase::Dealing,
            round_no: 0,
            hands: Default::default(),
            turn: None,
            leader: None,
            round_first_leader: config.first_leader,
            scores: [0; 2],
            round: RoundState::empty(),
            seed,
            config,
        }
    }

    /// A round is complete exactly when every hand is empty.
    pub fn is_round_complete(&self) -> bool {
        self.hands.iter().all(|h| h.is_empty())
    }
}

pub fn require_turn(state: &MatchState, ctx: &'static str) -> Result<Seat, DomainError> {
    state.turn.ok_or_else(|| {
        DomainError::invariant(format!("turn must be set ({ctx})"))
    })
}

pub fn require_leader(state: &MatchState, ctx: &'static str) -> Result<Seat, DomainError> {
    state.leader.ok_or_else(|| {
        DomainError::invariant(format!("leader must be set ({ctx})"))
    })
}

/// Card-conservation audit: while a round is live, the 32 cards must be
/// partitioned exactly across the four hands, the current trick, and the
/// tricks captured this round — no duplicates, no losses.
///
/// A failure here is a defect in the engine, never a client error, so it
/// surfaces as `DomainError::Invariant`.
pub fn audit_card_partition(state: &MatchState) -> Result<(), DomainError> {
    let mut seen: HashSet<Card> = HashSet::with_capacity(DECK_SIZE);
    let mut total = 0usize;

    let mut absorb = |card: Card| -> Result<(), DomainError> {
        total += 1;
        if !seen.insert(card) {
            return Err(DomainError::invariant(format!(
                "card {card:?} appears twice in the partition"
            )));
        }
        Ok(())
    };

    for hand in &state.hands {
        for &card in hand {
            absorb(card)?;
        }
    }
    for &(_, card) in &state.round.trick_plays {
        absorb(card)?;
    }
    for &card in &state.round.captured {
        absorb(card)?;
    }

    if total != DECK_SIZE {
        return Err(DomainError::invariant(format!(
            "partition holds {total} cards, expected {DECK_SIZE}"
        )));
    }
    Ok(())
}

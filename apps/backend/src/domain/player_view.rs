//! Per-seat projections of room state.
//!
//! A seat only ever sees its own hand; everything else in the view is
//! public information every client receives through the event stream
//! anyway. Used by clients that (re)connect mid-match and need to catch up
//! without a full replay.

use serde::{Deserialize, Serialize};

use crate::domain::state::{MatchState, Phase, Seat};
use crate::domain::{Card, Suit};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: Seat,
    pub phase: Phase,
    pub round_no: u16,
    /// The viewing seat's own cards; other hands are never exposed.
    pub hand: Vec<Card>,
    pub trick_plays: Vec<(Seat, Card)>,
    pub trick_lead: Option<Suit>,
    pub trick_no: u8,
    pub turn: Option<Seat>,
    pub abnat: [u16; 2],
    pub scores: [u16; 2],
}

pub fn seat_view(state: &MatchState, seat: Seat) -> SeatView {
    SeatView {
        seat,
        phase: state.phase,
        round_no: state.round_no,
        hand: state.hands[seat as usize].clone(),
        trick_plays: state.round.trick_plays.clone(),
        trick_lead: state.round.trick_lead,
        trick_no: state.round.trick_no,
        turn: state.turn,
        abnat: state.round.abnat,
        scores: state.scores,
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::state::{Seat, TeamId};
use crate::domain::Card;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

/// Rooms are addressed by caller-chosen string identity, created on first
/// join.
pub type RoomId = String;

/// Inbound player actions. One variant today; the tag leaves room for more.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    PlayCard { card: Card },
}

/// State transitions replicated to the room's seats.
///
/// Every accepted mutation appends its events to the room log in the order
/// they were produced; subscribers observe that order and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJoined {
        seat: Seat,
        player_id: i64,
        name: String,
    },
    PlayerReady {
        seat: Seat,
    },
    RoundStarted {
        round_no: u16,
        leader: Seat,
    },
    /// Seat-private: only the owning seat's connections receive it.
    HandDealt {
        seat: Seat,
        cards: Vec<Card>,
    },
    CardPlayed {
        seat: Seat,
        card: Card,
        next_turn: Option<Seat>,
    },
    TrickResolved {
        winner_seat: Seat,
        points: u16,
        trick_no: u8,
    },
    /// Cumulative match totals after the round's scoring.
    RoundEnded {
        team_a_score: u16,
        team_b_score: u16,
    },
    MatchEnded {
        winning_team: TeamId,
    },
}

/// Delivery scope of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventScope {
    /// Every seat in the room.
    Room,
    /// Only connections bound to this seat.
    Seat(Seat),
}

impl GameEvent {
    pub fn scope(&self) -> EventScope {
        match self {
            GameEvent::HandDealt { seat, .. } => EventScope::Seat(*seat),
            _ => EventScope::Room,
        }
    }
}

/// A logged event, tagged with the room's monotonically increasing sequence
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub room_id: RoomId,
    pub seq: u64,
    pub event: GameEvent,
}

impl Envelope {
    /// Whether this envelope is visible to a connection bound to `seat`.
    pub fn visible_to(&self, seat: Seat) -> bool {
        match self.event.scope() {
            EventScope::Room => true,
            EventScope::Seat(owner) => owner == seat,
        }
    }
}

/// Wire form of a rejected action: returned to the acting connection only,
/// never sequenced into the room log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&DomainError> for ActionError {
    fn from(err: &DomainError) -> Self {
        Self {
            code: ErrorCode::from(err),
            message: err.to_string(),
        }
    }
}

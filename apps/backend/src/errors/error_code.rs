//! Stable error codes surfaced to clients.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear in
//! rejection replies.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

/// Centralized error codes for action rejections.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string so clients
/// can branch on the code without parsing the human-readable detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Rule violations
    /// Acted out of turn
    OutOfTurn,
    /// Card not in the acting seat's hand
    CardNotHeld,
    /// Must follow the lead suit
    SuitViolation,
    /// Match already ended
    MatchOver,
    /// Room has not started a match yet
    RoomNotReady,
    /// All four seats are bound
    RoomFull,
    /// Action does not apply to the current phase
    PhaseMismatch,
    /// Card token could not be parsed
    ParseCard,
    /// General validation error
    ValidationError,

    // Conflicts
    /// Seat already taken
    SeatTaken,

    // Missing resources
    /// Room not found
    RoomNotFound,
    /// Seat not bound to a player
    SeatNotFound,

    /// Internal engine fault
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::OutOfTurn => "OUT_OF_TURN",
            ErrorCode::CardNotHeld => "CARD_NOT_HELD",
            ErrorCode::SuitViolation => "SUIT_VIOLATION",
            ErrorCode::MatchOver => "MATCH_OVER",
            ErrorCode::RoomNotReady => "ROOM_NOT_READY",
            ErrorCode::RoomFull => "ROOM_FULL",
            ErrorCode::PhaseMismatch => "PHASE_MISMATCH",
            ErrorCode::ParseCard => "PARSE_CARD",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::SeatTaken => "SEAT_TAKEN",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::SeatNotFound => "SEAT_NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation { kind, .. } => match kind {
                ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                ValidationKind::CardNotHeld => ErrorCode::CardNotHeld,
                ValidationKind::SuitViolation => ErrorCode::SuitViolation,
                ValidationKind::MatchOver => ErrorCode::MatchOver,
                ValidationKind::RoomNotReady => ErrorCode::RoomNotReady,
                ValidationKind::RoomFull => ErrorCode::RoomFull,
                ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                ValidationKind::ParseCard => ErrorCode::ParseCard,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Conflict { kind, .. } => match kind {
                ConflictKind::SeatTaken => ErrorCode::SeatTaken,
            },
            DomainError::NotFound { kind, .. } => match kind {
                NotFoundKind::Room => ErrorCode::RoomNotFound,
                NotFoundKind::Seat => ErrorCode::SeatNotFound,
            },
            DomainError::Invariant(_) => ErrorCode::Internal,
        }
    }
}

//! Domain-level error type used across the engine.
//!
//! This error type is transport-agnostic. The session layer that carries
//! actions in and events out converts rejections to wire form via
//! `realtime::protocol::ActionError` / `errors::ErrorCode`.

use thiserror::Error;

/// Rule violations a player action can be rejected with.
///
/// All of these are recoverable: the action is refused, room state is left
/// untouched, and only the acting seat learns why.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Seat acted while another seat was expected to act.
    OutOfTurn,
    /// Seat played a card its hand does not contain.
    CardNotHeld,
    /// Seat broke the follow-suit rule while still holding the lead suit.
    SuitViolation,
    /// Play submitted after the match reached its target score.
    MatchOver,
    /// Play submitted before all four seats were filled and ready.
    RoomNotReady,
    /// Join attempted on a room with all four seats bound.
    RoomFull,
    /// Action does not apply to the room's current phase.
    PhaseMismatch,
    /// Card token could not be parsed.
    ParseCard,
    Other(String),
}

/// Semantic conflict kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SeatTaken,
}

/// Missing resources in domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Seat,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input/user validation or game rule violation.
    #[error("validation error {kind:?}: {detail}")]
    Validation { kind: ValidationKind, detail: String },
    /// Semantic conflict.
    #[error("conflict {kind:?}: {detail}")]
    Conflict { kind: ConflictKind, detail: String },
    /// Missing resource in domain terms.
    #[error("not found {kind:?}: {detail}")]
    NotFound { kind: NotFoundKind, detail: String },
    /// Internal consistency fault. Never caused by client input; indicates a
    /// defect in the engine itself (e.g. the 32-card partition audit failed).
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation {
            kind: ValidationKind::Other(detail.clone()),
            detail,
        }
    }

    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            detail: detail.into(),
        }
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// The validation kind, if this is a validation rejection.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            Self::Validation { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

//! Game flow orchestration service - bridges pure domain logic with room
//! state.
//!
//! Every method runs its validate-mutate-collect-events sequence inside the
//! target room's mutation guard; the resulting events land on the room log
//! and are delivered by the dispatcher after the guard is released.

mod player_actions;
mod round_lifecycle;
mod seats;

use crate::domain::state::MatchState;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::rooms::room::RoomInner;

/// Game flow service.
#[derive(Default)]
pub struct GameFlowService;

pub use seats::JoinOutcome;

pub(super) fn require_game_mut(inner: &mut RoomInner) -> Result<&mut MatchState, DomainError> {
    inner.game.as_mut().ok_or_else(|| {
        DomainError::validation(ValidationKind::RoomNotReady, "Match has not started")
    })
}

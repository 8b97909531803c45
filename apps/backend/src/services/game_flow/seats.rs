use tracing::{debug, info};

use super::GameFlowService;
use crate::config::rules::MatchConfig;
use crate::domain::state::Seat;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::realtime::protocol::GameEvent;
use crate::rooms::room::{PlayerProfile, Room, SeatBinding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    pub seat: Seat,
    /// The player already held this seat; nothing changed.
    pub rejoined: bool,
}

impl GameFlowService {
    /// Bind the player to the next free seat, or hand back the seat they
    /// already hold (reconnect). Seat bindings last for the lifetime of the
    /// room.
    pub fn join_room(
        &self,
        room: &Room,
        profile: PlayerProfile,
    ) -> Result<JoinOutcome, DomainError> {
        room.mutate(|inner| {
            if let Some(seat) = inner.seat_of_player(profile.player_id) {
                debug!(room_id = %room.id(), seat, player_id = profile.player_id, "player rejoined");
                return Ok(JoinOutcome { seat, rejoined: true });
            }

            let Some(seat) = inner.free_seat() else {
                return Err(DomainError::validation(
                    ValidationKind::RoomFull,
                    "Room is full",
                ));
            };

            inner.seats[seat as usize] = Some(SeatBinding {
                player_id: profile.player_id,
                name: profile.name.clone(),
                ready: false,
            });
            inner.push_event(GameEvent::PlayerJoined {
                seat,
                player_id: profile.player_id,
                name: profile.name,
            });

            info!(room_id = %room.id(), seat, player_id = profile.player_id, "player joined");
            Ok(JoinOutcome {
                seat,
                rejoined: false,
            })
        })
    }

    /// Flag a seat as ready. When the fourth seat readies up, the match
    /// starts and the first round is dealt in the same guarded mutation.
    /// Returns whether the match started. No-op once a match is running.
    pub fn mark_ready(
        &self,
        room: &Room,
        seat: Seat,
        config: &MatchConfig,
    ) -> Result<bool, DomainError> {
        room.mutate(|inner| {
            if inner.game.is_some() {
                return Ok(false);
            }

            let newly_ready = {
                let Some(binding) = inner.seats.get_mut(seat as usize).and_then(|s| s.as_mut())
                else {
                    return Err(DomainError::not_found(
                        NotFoundKind::Seat,
                        format!("Seat {seat} is not bound to a player"),
                    ));
                };
                if binding.ready {
                    false
                } else {
                    binding.ready = true;
                    true
                }
            };
            if newly_ready {
                inner.push_event(GameEvent::PlayerReady { seat });
            }

            if inner.all_ready() {
                self.start_match(inner, config)?;
                info!(room_id = %room.id(), "all seats ready, match started");
                return Ok(true);
            }
            Ok(false)
        })
    }
}

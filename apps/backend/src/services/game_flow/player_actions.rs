use tracing::{debug, info};

use super::{require_game_mut, GameFlowService};
use crate::config::rules::MatchConfig;
use crate::domain::rules::SEATS;
use crate::domain::state::{Phase, Seat};
use crate::domain::tricks::{self, PlayCardResult};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::realtime::protocol::GameEvent;
use crate::rooms::room::Room;

impl GameFlowService {
    /// Play a card for a seat in the current trick.
    ///
    /// The single play entry point: phase dispatch, domain rule checks,
    /// trick resolution, and any round/match rollover all happen inside one
    /// guarded mutation, so concurrent submissions apply in a total order.
    /// Rejections leave the room untouched and are returned to the caller
    /// only; no event is logged for them.
    pub fn submit_play(
        &self,
        room: &Room,
        seat: Seat,
        card: Card,
        config: &MatchConfig,
    ) -> Result<PlayCardResult, DomainError> {
        room.mutate(|inner| {
            if seat as usize >= SEATS {
                return Err(DomainError::validation_other(format!(
                    "Seat {seat} is out of range 0-3"
                )));
            }

            match inner.phase() {
                Phase::Waiting | Phase::Dealing => {
                    return Err(DomainError::validation(
                        ValidationKind::RoomNotReady,
                        "Match has not started",
                    ));
                }
                Phase::MatchEnd => {
                    return Err(DomainError::validation(
                        ValidationKind::MatchOver,
                        "Match already ended",
                    ));
                }
                // RoundEnd never survives past its own mutation.
                Phase::RoundEnd => {
                    return Err(DomainError::invariant("round scoring leaked out of its mutation"));
                }
                Phase::Trick { .. } => {}
            }

            let game = require_game_mut(inner)?;
            let trick_no = game.round.trick_no;

            let result = tricks::play_card(game, seat, card)?;
            let next_turn = game.turn;

            debug!(room_id = %room.id(), seat, trick_no, "card played");
            inner.push_event(GameEvent::CardPlayed {
                seat,
                card,
                next_turn,
            });

            if result.trick_completed {
                let Some(winner_seat) = result.trick_winner else {
                    return Err(DomainError::invariant("completed trick without a winner"));
                };
                info!(
                    room_id = %room.id(),
                    trick_no,
                    winner_seat,
                    points = result.trick_points,
                    "trick resolved"
                );
                inner.push_event(GameEvent::TrickResolved {
                    winner_seat,
                    points: result.trick_points,
                    trick_no,
                });
            }

            if result.round_complete {
                self.finish_round(inner, config)?;
            }

            Ok(result)
        })
    }
}

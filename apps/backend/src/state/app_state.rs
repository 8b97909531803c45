use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use crate::config::rules::MatchConfig;
use crate::domain::player_view::{seat_view, SeatView};
use crate::domain::state::{Phase, Seat};
use crate::domain::{tricks, Card};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::realtime::hub::GameHub;
use crate::realtime::protocol::{Action, Envelope};
use crate::rooms::registry::RoomRegistry;
use crate::rooms::room::PlayerProfile;
use crate::services::game_flow::{GameFlowService, JoinOutcome};

/// The externally-visible authority over every room in the process.
///
/// The transport/session layer holds one of these, maps its authenticated
/// connections to `(room_id, seat)`, and forwards actions in and event
/// streams out. Mutations run under the target room's guard; delivery runs
/// after the guard is released.
pub struct AppState {
    config: MatchConfig,
    rooms: RoomRegistry,
    hub: Arc<GameHub>,
    flow: GameFlowService,
}

impl AppState {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            rooms: RoomRegistry::new(),
            hub: Arc::new(GameHub::new()),
            flow: GameFlowService,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Join a room (created on first join), binding the player to a seat.
    pub fn join_room(
        &self,
        room_id: &str,
        profile: PlayerProfile,
    ) -> Result<JoinOutcome, DomainError> {
        let room = self.rooms.get_or_create(room_id);
        let outcome = self.flow.join_room(&room, profile)?;
        self.hub.flush(&room);
        Ok(outcome)
    }

    /// Flag a seat ready; the match starts (and round one is dealt) when all
    /// four seats are ready. Returns whether this call started the match.
    pub fn mark_ready(&self, room_id: &str, seat: Seat) -> Result<bool, DomainError> {
        let room = self.rooms.get(room_id)?;
        let started = self.flow.mark_ready(&room, seat, &self.config)?;
        self.hub.flush(&room);
        Ok(started)
    }

    /// Apply a player action against a room. The single mutating entry point
    /// for play traffic.
    pub fn submit_action(
        &self,
        room_id: &str,
        seat: Seat,
        action: Action,
    ) -> Result<(), DomainError> {
        let room = self.rooms.get(room_id)?;
        let result = match action {
            Action::PlayCard { card } => self.flow.submit_play(&room, seat, card, &self.config),
        };
        // Flush regardless of outcome: rejections logged nothing, and the
        // room must not sit on accepted events if an invariant error
        // surfaced after they were appended.
        self.hub.flush(&room);
        result.map(|_| ())
    }

    /// Attach an outbound event stream for a connection bound to `seat`.
    pub fn subscribe(
        &self,
        room_id: &str,
        seat: Seat,
    ) -> Result<(Uuid, UnboundedReceiver<Envelope>), DomainError> {
        // The room must exist; subscribing must not create one.
        self.rooms.get(room_id)?;
        Ok(self.hub.subscribe(room_id, seat))
    }

    pub fn unsubscribe(&self, room_id: &str, token: Uuid) {
        self.hub.unsubscribe(room_id, token);
    }

    /// Catch-up replay: logged events after `seq` visible to `seat`.
    pub fn events_since(
        &self,
        room_id: &str,
        seat: Seat,
        seq: u64,
    ) -> Result<Vec<Envelope>, DomainError> {
        let room = self.rooms.get(room_id)?;
        Ok(room.read(|inner| inner.events_since(seat, seq)))
    }

    /// The room's current phase. A display read: stale the moment it
    /// returns.
    pub fn phase(&self, room_id: &str) -> Result<Phase, DomainError> {
        let room = self.rooms.get(room_id)?;
        Ok(room.phase())
    }

    /// Redacted room snapshot for one seat (reconnect/catch-up).
    pub fn seat_view(&self, room_id: &str, seat: Seat) -> Result<SeatView, DomainError> {
        let room = self.rooms.get(room_id)?;
        room.read(|inner| {
            inner.require_seat(seat)?;
            let game = inner.game.as_ref().ok_or_else(|| {
                DomainError::validation(ValidationKind::RoomNotReady, "Match has not started")
            })?;
            Ok(seat_view(game, seat))
        })
    }

    /// The cards `seat` may legally play right now; empty off-turn, exactly
    /// as the engine would rule on submission.
    pub fn legal_plays(&self, room_id: &str, seat: Seat) -> Result<Vec<Card>, DomainError> {
        let room = self.rooms.get(room_id)?;
        room.read(|inner| {
            let Some(game) = inner.game.as_ref() else {
                return Ok(Vec::new());
            };
            if game.turn != Some(seat) {
                return Ok(Vec::new());
            }
            Ok(tricks::legal_moves(game, seat))
        })
    }

    /// Tear down rooms with no accepted mutation for `max_idle`, releasing
    /// their dispatcher channels. Finished matches age out through this
    /// sweep. Returns how many rooms were removed.
    pub fn purge_idle(&self, max_idle: Duration) -> usize {
        let purged = self.rooms.purge_idle(max_idle);
        for room_id in &purged {
            self.hub.drop_room(room_id);
        }
        purged.len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::domain::rules::SEATS;
use crate::domain::state::{MatchState, Phase, Seat};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::realtime::protocol::{Envelope, GameEvent, RoomId};

/// Identity of an authenticated player, supplied by the external session
/// layer. The engine trusts this binding and performs no authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub player_id: i64,
    pub name: String,
}

/// One seat's binding for the lifetime of the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatBinding {
    pub player_id: i64,
    pub name: String,
    pub ready: bool,
}

/// Events retained per room for catch-up replay. A single mutation emits at
/// most a handful of events, so a burst can never outrun this between two
/// dispatcher flushes.
pub const LOG_CAPACITY: usize = 256;

/// Everything behind the room's mutation lock.
pub struct RoomInner {
    room_id: RoomId,
    pub seats: [Option<SeatBinding>; SEATS],
    pub game: Option<MatchState>,
    /// Bumped once per accepted mutation.
    pub version: u64,
    next_seq: u64,
    log: VecDeque<Envelope>,
}

impl RoomInner {
    fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            seats: Default::default(),
            game: None,
            version: 0,
            next_seq: 0,
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Append an event to the room log, assigning the next sequence number.
    /// Called only from inside a guarded mutation, so the log order is the
    /// order mutations produced events.
    pub fn push_event(&mut self, event: GameEvent) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(Envelope {
            room_id: self.room_id.clone(),
            seq,
            event,
        });
        seq
    }

    /// Highest sequence number assigned so far.
    pub fn last_seq(&self) -> u64 {
        self.next_seq
    }

    /// All logged envelopes after `seq`, regardless of scope. The dispatcher
    /// applies per-seat visibility at delivery time.
    pub fn events_after(&self, seq: u64) -> Vec<Envelope> {
        self.log
            .iter()
            .filter(|e| e.seq > seq)
            .cloned()
            .collect()
    }

    /// Logged envelopes after `seq` that `seat` is allowed to see.
    pub fn events_since(&self, seat: Seat, seq: u64) -> Vec<Envelope> {
        self.log
            .iter()
            .filter(|e| e.seq > seq && e.visible_to(seat))
            .cloned()
            .collect()
    }

    /// The room's externally observable phase.
    pub fn phase(&self) -> Phase {
        self.game.as_ref().map_or(Phase::Waiting, |g| g.phase)
    }

    pub fn seat_of_player(&self, player_id: i64) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| s.as_ref().is_some_and(|b| b.player_id == player_id))
            .map(|i| i as Seat)
    }

    pub fn free_seat(&self) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| s.is_none())
            .map(|i| i as Seat)
    }

    pub fn all_ready(&self) -> bool {
        self.seats
            .iter()
            .all(|s| s.as_ref().is_some_and(|b| b.ready))
    }

    pub fn require_seat(&self, seat: Seat) -> Result<&SeatBinding, DomainError> {
        self.seats
            .get(seat as usize)
            .and_then(|s| s.as_ref())
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Seat,
                    format!("Seat {seat} is not bound to a player"),
                )
            })
    }
}

/// One game room. The mutex is the room's concurrency guard: all mutating
/// access goes through [`Room::mutate`], which serializes concurrent client
/// actions into a total order per room.
pub struct Room {
    id: RoomId,
    inner: Mutex<RoomInner>,
    last_activity: Mutex<Instant>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        let inner = RoomInner::new(id.clone());
        Self {
            id,
            inner: Mutex::new(inner),
            last_activity: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Run a mutating action under the room's critical section.
    ///
    /// The guard is released on every exit path, including rejections. The
    /// closure must not perform blocking I/O; it validates, mutates, and
    /// appends the resulting events to the log — delivery happens after the
    /// lock is released.
    pub fn mutate<T>(
        &self,
        f: impl FnOnce(&mut RoomInner) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut inner = self.inner.lock();
        let out = f(&mut inner)?;
        inner.version += 1;
        *self.last_activity.lock() = Instant::now();
        Ok(out)
    }

    /// Read a snapshot of room state. Takes the lock briefly; callers must
    /// tolerate the result going stale the moment it is returned.
    pub fn read<T>(&self, f: impl FnOnce(&RoomInner) -> T) -> T {
        let inner = self.inner.lock();
        f(&inner)
    }

    pub fn phase(&self) -> Phase {
        self.read(|inner| inner.phase())
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.lock().elapsed()
    }
}

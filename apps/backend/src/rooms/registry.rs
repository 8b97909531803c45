use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::info;

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::realtime::protocol::RoomId;
use crate::rooms::room::Room;

/// Process-wide map of live rooms.
///
/// Rooms are created on first join and torn down explicitly (`remove`) or by
/// the idle sweep (`purge_idle`) — a finished match stops receiving activity
/// and ages out. Distinct rooms share nothing mutable, so actions against
/// different rooms proceed fully in parallel.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Fetch a room, creating it on first reference.
    pub fn get_or_create(&self, room_id: &str) -> Arc<Room> {
        self.rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                info!(room_id, "created room");
                Arc::new(Room::new(room_id.to_string()))
            })
            .clone()
    }

    pub fn get(&self, room_id: &str) -> Result<Arc<Room>, DomainError> {
        self.rooms
            .get(room_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
            })
    }

    pub fn remove(&self, room_id: &str) -> bool {
        let removed = self.rooms.remove(room_id).is_some();
        if removed {
            info!(room_id, "removed room");
        }
        removed
    }

    /// Drop rooms with no accepted mutation for `max_idle`. Returns the ids
    /// removed so the caller can release their dispatcher channels too.
    pub fn purge_idle(&self, max_idle: Duration) -> Vec<RoomId> {
        let stale: Vec<RoomId> = self
            .rooms
            .iter()
            .filter(|entry| entry.value().idle_for() > max_idle)
            .map(|entry| entry.key().clone())
            .collect();
        for room_id in &stale {
            self.rooms.remove(room_id);
            info!(room_id, "purged idle room");
        }
        stale
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

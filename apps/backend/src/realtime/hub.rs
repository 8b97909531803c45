use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;
use uuid::Uuid;

use crate::domain::state::Seat;
use crate::realtime::protocol::{Envelope, RoomId};
use crate::rooms::room::Room;

struct Subscriber {
    seat: Seat,
    tx: UnboundedSender<Envelope>,
}

#[derive(Default)]
struct RoomChannel {
    subscribers: DashMap<Uuid, Subscriber>,
    /// Highest sequence number delivered so far. The mutex doubles as the
    /// per-room delivery critical section: two mutations racing to flush
    /// cannot interleave their events, so every subscriber observes the log
    /// order and nothing else.
    delivered: Mutex<u64>,
}

/// Fans the per-room event log out to connected seats.
///
/// Delivery is best-effort: a subscriber whose channel is gone is dropped
/// with a warning and never fails or blocks the mutation that produced the
/// event. Sends are unbounded-channel enqueues — the actual network write
/// belongs to whatever transport drains the receiver.
#[derive(Default)]
pub struct GameHub {
    channels: DashMap<RoomId, Arc<RoomChannel>>,
}

impl GameHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    fn channel(&self, room_id: &str) -> Arc<RoomChannel> {
        self.channels
            .entry(room_id.to_string())
            .or_default()
            .clone()
    }

    /// Attach a connection for `seat`. Returns the connection token and the
    /// receiving end of its event stream. Events logged before this call are
    /// not replayed automatically; use `RoomInner::events_since` to catch
    /// up.
    pub fn subscribe(&self, room_id: &str, seat: Seat) -> (Uuid, UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = Uuid::new_v4();
        self.channel(room_id)
            .subscribers
            .insert(token, Subscriber { seat, tx });
        (token, rx)
    }

    pub fn unsubscribe(&self, room_id: &str, token: Uuid) {
        if let Some(chan) = self.channels.get(room_id) {
            chan.subscribers.remove(&token);
        }
    }

    /// Deliver every not-yet-delivered log entry to the room's subscribers,
    /// strictly in sequence order. Safe to call from any thread after any
    /// mutation; whoever gets the delivery lock first ships everything
    /// pending.
    pub fn flush(&self, room: &Room) {
        let chan = self.channel(room.id());
        let mut delivered = chan.delivered.lock();
        let pending = room.read(|inner| inner.events_after(*delivered));

        for envelope in pending {
            *delivered = envelope.seq;
            let mut dead: Vec<Uuid> = Vec::new();
            for sub in chan.subscribers.iter() {
                if !envelope.visible_to(sub.seat) {
                    continue;
                }
                if sub.tx.send(envelope.clone()).is_err() {
                    dead.push(*sub.key());
                }
            }
            for token in dead {
                chan.subscribers.remove(&token);
                warn!(room_id = %room.id(), conn = %token, "dropping disconnected subscriber");
            }
        }
    }

    /// Release a room's subscriber set (registry teardown).
    pub fn drop_room(&self, room_id: &str) {
        self.channels.remove(room_id);
    }

    pub fn subscriber_count(&self, room_id: &str) -> usize {
        self.channels
            .get(room_id)
            .map(|chan| chan.subscribers.len())
            .unwrap_or(0)
    }
}

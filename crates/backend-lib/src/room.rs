// ============================
// crates/backend-lib/src/room.rs
// ============================
//! Room registry: one lazily-created log per room identifier.

use dashmap::DashMap;
use metrics::{counter, gauge};
use std::sync::Arc;

use crate::metrics::{ROOMS_ACTIVE, ROOMS_CREATED};
use crate::room_log::RoomLog;

pub type RoomId = String;

/// Concurrent mapping from room identifier to that room's message log.
///
/// Identifiers are case-sensitive. There is no deletion: a room, once
/// referenced, lives until process exit.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<RoomLog>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the log for `room_id`, allocating an empty one the first time
    /// the identifier is referenced by any writer or reader.
    ///
    /// Insert-if-absent goes through the shard-locked entry API, so
    /// concurrent first access from any number of callers yields exactly
    /// one surviving log that every caller observes from then on.
    pub fn get_or_create(&self, room_id: &str) -> Arc<RoomLog> {
        if let Some(log) = self.rooms.get(room_id) {
            return Arc::clone(log.value());
        }

        let log = Arc::clone(
            self.rooms
                .entry(room_id.to_owned())
                .or_insert_with(|| {
                    tracing::debug!(room = %room_id, "room created");
                    counter!(ROOMS_CREATED).increment(1);
                    Arc::new(RoomLog::new())
                })
                .value(),
        );
        gauge!(ROOMS_ACTIVE).set(self.rooms.len() as f64);
        log
    }

    /// Look a room up without creating it.
    pub fn get(&self, room_id: &str) -> Option<Arc<RoomLog>> {
        self.rooms.get(room_id).map(|entry| Arc::clone(entry.value()))
    }

    /// All known room identifiers, in no particular order.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

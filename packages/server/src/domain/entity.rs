//! Core domain models for chat rooms.

use serde::{Deserialize, Serialize};

use super::value_object::{ClientId, RoomName, Timestamp};

/// A named chat room.
///
/// The name is globally unique; it is the durable store key and the
/// membership cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room name (identity)
    pub name: RoomName,
    /// Timestamp when the room was first persisted
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new room with the given name and creation timestamp
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self { name, created_at }
    }

    /// Key under which this room and its clients are stored and cached
    pub fn key(&self) -> &RoomName {
        &self.name
    }
}

/// A participant registered in a room.
///
/// `room` is the explicit parent reference: it scopes membership queries and
/// groups every client of a room into one consistency scope in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Participant identifier, also the delivery recipient
    pub client_id: ClientId,
    /// Owning room
    pub room: RoomName,
    /// Timestamp when the client joined
    pub joined_at: Timestamp,
}

impl Client {
    /// Create a new client owned by `room`
    pub fn new(client_id: ClientId, room: RoomName, joined_at: Timestamp) -> Self {
        Self {
            client_id,
            room,
            joined_at,
        }
    }

    /// Whether this client is scoped under `room`
    pub fn belongs_to(&self, room: &RoomName) -> bool {
        &self.room == room
    }
}

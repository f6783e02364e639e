//! Durable store abstraction.
//!
//! The domain owns these traits; infrastructure provides implementations
//! (dependency inversion). Rooms are keyed by name and clients are stored as
//! descendants of their room, so all members of a room share one
//! consistency scope.

use async_trait::async_trait;

use super::{
    entity::{Client, Room},
    error::StoreError,
    value_object::{ClientId, RoomName},
};

/// Key-based access to Room and Client records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Fetch a room by name. `Ok(None)` means the record does not exist.
    async fn get_room(&self, name: &RoomName) -> Result<Option<Room>, StoreError>;

    /// Persist a room record, overwriting any existing one.
    async fn put_room(&self, room: &Room) -> Result<(), StoreError>;

    /// Persist a client record under its parent room.
    async fn put_client(&self, client: &Client) -> Result<(), StoreError>;

    /// Remove a client record. Removing an absent client is not an error.
    async fn delete_client(&self, room: &RoomName, client_id: &ClientId)
    -> Result<(), StoreError>;

    /// All clients scoped under `room`. Order is store-defined.
    async fn query_clients(&self, room: &RoomName) -> Result<Vec<Client>, StoreError>;

    /// Open an all-or-nothing transaction.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, StoreError>;
}

/// A transaction against the durable store.
///
/// Writes are staged and become visible only on a successful
/// [`commit`](StoreTransaction::commit). Dropping the transaction discards
/// them.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Read a room inside the transaction's snapshot.
    async fn get_room(&mut self, name: &RoomName) -> Result<Option<Room>, StoreError>;

    /// Stage a room write.
    fn put_room(&mut self, room: Room);

    /// Apply all staged writes atomically.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

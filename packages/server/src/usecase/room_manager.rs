//! Room Manager
//!
//! Owns the injected collaborators and exposes the three room operations:
//! get-or-create, join and broadcast. The manager keeps no state between
//! calls; everything durable lives in the store and the cache, so one
//! instance can serve any number of concurrent requests.

use std::sync::Arc;

use crate::{
    config::RoomManagerConfig,
    domain::{
        ClientId, DeliveryChannel, DeliveryToken, MembershipCache, MessageContent, Room, RoomName,
        RoomStore, StoreError,
    },
};

use super::{
    broadcast_message::{BroadcastMessageUseCase, BroadcastReport},
    error::{BroadcastError, JoinError},
    get_or_create_room::GetOrCreateRoomUseCase,
    join_room::JoinRoomUseCase,
};

/// Entry point for request-handling layers.
pub struct RoomManager {
    get_or_create_room: GetOrCreateRoomUseCase,
    join_room: JoinRoomUseCase,
    broadcast_message: BroadcastMessageUseCase,
}

impl RoomManager {
    /// Build a manager over explicitly injected collaborators.
    pub fn new(
        store: Arc<dyn RoomStore>,
        cache: Arc<dyn MembershipCache>,
        channel: Arc<dyn DeliveryChannel>,
        config: RoomManagerConfig,
    ) -> Self {
        Self {
            get_or_create_room: GetOrCreateRoomUseCase::new(store.clone()),
            join_room: JoinRoomUseCase::new(
                store.clone(),
                cache.clone(),
                channel.clone(),
                config.clone(),
            ),
            broadcast_message: BroadcastMessageUseCase::new(store, cache, channel, config),
        }
    }

    /// Fetch the room named `name`, creating it atomically if absent.
    pub async fn get_or_create_room(&self, name: RoomName) -> Result<Room, StoreError> {
        self.get_or_create_room.execute(name).await
    }

    /// Register `client_id` in `room` and return its delivery token.
    pub async fn join(&self, room: &Room, client_id: ClientId) -> Result<DeliveryToken, JoinError> {
        self.join_room.execute(room, client_id).await
    }

    /// Deliver `message` to every current member of `room`, best-effort.
    pub async fn broadcast(
        &self,
        room: &Room,
        message: &MessageContent,
    ) -> Result<BroadcastReport, BroadcastError> {
        self.broadcast_message.execute(room, message).await
    }
}

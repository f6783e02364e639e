//! Shared application state.

use std::sync::Arc;

use crate::{
    config::RoomManagerConfig,
    infrastructure::{InMemoryDeliveryChannel, InMemoryMembershipCache, InMemoryRoomStore},
    usecase::RoomManager,
};

/// Shared application state
pub struct AppState {
    /// Room operations over the configured collaborators
    pub manager: Arc<RoomManager>,
    /// Delivery queues that participants attach to with their token
    /// (shared with the manager)
    pub deliveries: Arc<InMemoryDeliveryChannel>,
}

impl AppState {
    /// Build state backed by the in-memory store, cache and delivery channel.
    pub fn in_memory(config: &RoomManagerConfig) -> Self {
        let deliveries = Arc::new(InMemoryDeliveryChannel::new());
        let manager = Arc::new(RoomManager::new(
            Arc::new(InMemoryRoomStore::new()),
            Arc::new(InMemoryMembershipCache::new()),
            deliveries.clone(),
            config.clone(),
        ));
        Self {
            manager,
            deliveries,
        }
    }
}

//! Delivery channel abstraction.

use async_trait::async_trait;

use super::{
    error::ChannelError,
    value_object::{ClientId, DeliveryToken},
};

/// Best-effort point-to-point push to a single participant.
///
/// Every call is independently failable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Establish a channel for `client_id` and return the token the remote
    /// participant uses to attach to it.
    async fn create(&self, client_id: &ClientId) -> Result<DeliveryToken, ChannelError>;

    /// Push `message` to `client_id`.
    async fn send(&self, client_id: &ClientId, message: &str) -> Result<(), ChannelError>;
}

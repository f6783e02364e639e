//! Domain layer for chat rooms.
//!
//! This module contains business types and the collaborator traits the
//! use cases depend on. It is independent of DTOs and infrastructure.

pub mod cache;
pub mod channel;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use cache::{MembershipCache, membership_version_key, snapshot_key};
pub use channel::DeliveryChannel;
pub use entity::{Client, Room};
pub use error::{CacheError, ChannelError, StoreError, ValueObjectError};
pub use factory::{DeliveryTokenFactory, MembershipVersionFactory};
pub use repository::{RoomStore, StoreTransaction};
pub use value_object::{
    ClientId, DeliveryToken, MembershipVersion, MessageContent, RoomName, Timestamp,
};

#[cfg(test)]
pub use cache::MockMembershipCache;
#[cfg(test)]
pub use channel::MockDeliveryChannel;
#[cfg(test)]
pub use repository::MockRoomStore;

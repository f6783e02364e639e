//! Infrastructure layer.
//!
//! Concrete adapters for the domain's collaborator traits, and DTOs.

pub mod cache;
pub mod channel;
pub mod dto;
pub mod repository;

pub use cache::InMemoryMembershipCache;
pub use channel::InMemoryDeliveryChannel;
pub use repository::InMemoryRoomStore;

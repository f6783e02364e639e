//! Delivery channel implementations.

pub mod inmemory;

pub use inmemory::InMemoryDeliveryChannel;

//! Membership cache implementations.

pub mod inmemory;

pub use inmemory::InMemoryMembershipCache;

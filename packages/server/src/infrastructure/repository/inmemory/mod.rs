//! InMemory implementations of the durable store.

mod store;

pub use store::InMemoryRoomStore;

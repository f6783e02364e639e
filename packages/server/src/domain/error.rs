//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} bytes (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// RoomName contains a control character
    #[error("RoomName cannot contain control characters (got {0:?})")]
    RoomNameInvalidCharacter(String),

    /// ClientId validation error
    #[error("ClientId cannot be empty")]
    ClientIdEmpty,

    /// ClientId too long error
    #[error("ClientId cannot exceed {max} bytes (got {actual})")]
    ClientIdTooLong { max: usize, actual: usize },

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} bytes (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors reported by the durable record store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A transaction could not commit after the store's own retries
    #[error("transaction aborted: {0}")]
    TransactionAborted(String),

    /// The store refused to persist a record
    #[error("persistence rejected: {0}")]
    Rejected(String),
}

/// Errors reported by the membership cache.
///
/// A cache miss is not an error; see [`crate::domain::MembershipCache::get`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The cache backend malfunctioned
    #[error("cache backend error: {0}")]
    Backend(String),

    /// A cached membership snapshot could not be decoded
    #[error("corrupt membership snapshot for room '{room}': {reason}")]
    CorruptSnapshot { room: String, reason: String },
}

/// Errors reported by the delivery channel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// No channel was ever created for this recipient
    #[error("unknown recipient '{0}'")]
    UnknownRecipient(String),

    /// The recipient's channel is gone
    #[error("channel to '{0}' is closed")]
    Closed(String),

    /// Channel establishment failed
    #[error("failed to create channel for '{client_id}': {reason}")]
    CreateFailed { client_id: String, reason: String },
}

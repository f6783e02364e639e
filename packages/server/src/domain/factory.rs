//! Domain factories for creating value objects.

use super::{DeliveryToken, MembershipVersion};

/// Factory for generating DeliveryToken instances.
///
/// Keeps token generation out of the channel implementations so every
/// channel hands out tokens of the same shape.
pub struct DeliveryTokenFactory;

impl DeliveryTokenFactory {
    /// Generate a new opaque token from a random UUID v4.
    pub fn generate() -> DeliveryToken {
        DeliveryToken::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Factory for generating MembershipVersion stamps.
pub struct MembershipVersionFactory;

impl MembershipVersionFactory {
    /// Generate a stamp that no earlier membership state carries.
    pub fn generate() -> MembershipVersion {
        MembershipVersion::new(uuid::Uuid::new_v4().to_string())
    }
}

//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};

/// Room returned by the get-or-create endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDto {
    pub name: String,
    pub created_at: String, // ISO 8601
}

/// Join request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub client_id: String,
}

/// Join response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub room: String,
    pub client_id: String,
    pub token: String,
}

/// Broadcast request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub content: String,
}

/// A member the broadcast could not reach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryFailureDto {
    pub client_id: String,
    pub error: String,
}

/// Broadcast response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub attempted: usize,
    pub delivered: Vec<String>,
    pub failed: Vec<DeliveryFailureDto>,
}

/// Error body returned with any non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

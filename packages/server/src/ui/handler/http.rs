//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use cuddle_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    domain::{ClientId, MessageContent, Room, RoomName},
    infrastructure::dto::http::{
        BroadcastRequest, BroadcastResponse, DeliveryFailureDto, JoinRequest, JoinResponse,
        RoomDto,
    },
    ui::{error::ApiResult, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get a room by name, creating it on first reference
pub async fn get_or_create_room(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<RoomDto>> {
    let room = resolve_room(&state, name).await?;
    Ok(Json(RoomDto {
        name: room.name.as_str().to_string(),
        created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
    }))
}

/// Register a participant in a room and hand back its delivery token
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(request): Json<JoinRequest>,
) -> ApiResult<(StatusCode, Json<JoinResponse>)> {
    // Convert String -> Domain Models before touching the store
    let client_id = ClientId::try_from(request.client_id)?;
    let room = resolve_room(&state, name).await?;

    let token = state.manager.join(&room, client_id.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(JoinResponse {
            room: room.name.into_string(),
            client_id: client_id.into_string(),
            token: token.into_string(),
        }),
    ))
}

/// Broadcast a message to every member of a room
pub async fn broadcast_message(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(request): Json<BroadcastRequest>,
) -> ApiResult<Json<BroadcastResponse>> {
    let content = MessageContent::try_from(request.content)?;
    let room = resolve_room(&state, name).await?;

    let report = state.manager.broadcast(&room, &content).await?;
    tracing::info!(
        "Broadcast to room '{}': {} delivered, {} failed",
        room.name,
        report.delivered.len(),
        report.failed.len()
    );

    Ok(Json(BroadcastResponse {
        attempted: report.attempted(),
        delivered: report
            .delivered
            .iter()
            .map(|id| id.as_str().to_string())
            .collect(),
        failed: report
            .failed
            .iter()
            .map(|failure| DeliveryFailureDto {
                client_id: failure.client_id.as_str().to_string(),
                error: failure.error.to_string(),
            })
            .collect(),
    }))
}

async fn resolve_room(state: &AppState, name: String) -> ApiResult<Room> {
    let name = RoomName::try_from(name)?;
    Ok(state.manager.get_or_create_room(name).await?)
}

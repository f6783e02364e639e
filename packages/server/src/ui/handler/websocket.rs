//! WebSocket delivery handler.
//!
//! A participant redeems the token returned by join and receives every
//! message broadcast to it as a text frame.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{domain::DeliveryToken, ui::state::AppState};

pub async fn delivery_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let token = DeliveryToken::new(token);

    // Each token can be redeemed once
    let Some(rx) = state.deliveries.attach(&token).await else {
        tracing::warn!("Rejected attach with unknown or redeemed delivery token");
        return Err(StatusCode::NOT_FOUND);
    };

    tracing::info!("Delivery queue attached");
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, token, rx)))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    token: DeliveryToken,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    // Delivery is one-way; inbound frames only signal that the peer is gone
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    // Forward queued broadcasts to the participant
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.deliveries.detach(&token).await;
    tracing::info!("Delivery queue detached");
}

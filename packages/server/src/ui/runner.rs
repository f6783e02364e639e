//! Server runner.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::{
    handler::{broadcast_message, delivery_handler, get_or_create_room, health_check, join_room},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the HTTP router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/rooms/{name}", put(get_or_create_room))
        .route("/api/rooms/{name}/clients", post(join_room))
        .route("/api/rooms/{name}/messages", post(broadcast_message))
        .route("/api/deliveries/{token}", get(delivery_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `state` on an already-bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let state = Arc::new(AppState::in_memory(&config.manager));
    serve(listener, state, shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

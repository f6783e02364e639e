//! Shared fixtures for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use cuddle_server::{
    RoomManagerConfig,
    ui::{self, AppState},
};
use tokio::{net::TcpListener, task::JoinHandle};

/// An in-memory server bound to an ephemeral port.
///
/// The server task is aborted when the fixture is dropped.
pub struct TestServer {
    base_url: String,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let state = Arc::new(AppState::in_memory(&RoomManagerConfig::default()));
        let handle = tokio::spawn(ui::serve(listener, state, std::future::pending()));

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.replacen("http://", "ws://", 1), path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//! Application state container shared across Axum route handlers and background tasks.
//!
//! Holds the database connection and the WebSocket topic hub used to push
//! check-in/check-out events to room dashboards.

use crate::ws::WebSocketManager;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ws: WebSocketManager,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and WebSocket manager.
    pub fn new(db: DatabaseConnection, ws: WebSocketManager) -> Self {
        Self { db, ws }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the internal `WebSocketManager`.
    pub fn ws(&self) -> &WebSocketManager {
        &self.ws
    }

    /// Returns a cloned instance of the `WebSocketManager`.
    pub fn ws_clone(&self) -> WebSocketManager {
        self.ws.clone()
    }
}

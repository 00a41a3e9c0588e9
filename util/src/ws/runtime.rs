use crate::ws::WebSocketManager;
use axum::extract::ws::{Message, Utf8Bytes};
use serde::Serialize;
use tokio::sync::mpsc::{self, error::SendError};

/// Per-connection handle given to a `WsHandler`.
pub struct WsContext {
    pub topic: String,
    pub account_id: Option<i64>,
    pub ws: WebSocketManager,
    out_tx: mpsc::Sender<Message>,
}

impl WsContext {
    pub fn new(
        topic: String,
        account_id: Option<i64>,
        ws: WebSocketManager,
        out_tx: mpsc::Sender<Message>,
    ) -> Self {
        Self {
            topic,
            account_id,
            ws,
            out_tx,
        }
    }

    /// Send a single text frame to this client only.
    pub async fn reply_text(&self, text: impl Into<Utf8Bytes>) -> Result<(), SendError<Message>> {
        self.out_tx.send(Message::Text(text.into())).await
    }

    /// Send a WS-level pong to this client.
    pub async fn reply_pong(&self, payload: bytes::Bytes) -> Result<(), SendError<Message>> {
        self.out_tx.send(Message::Pong(payload)).await
    }

    /// Broadcast a JSON envelope on this topic.
    pub async fn emit<T: Serialize>(&self, event: &str, payload: &T) {
        crate::ws::emit(&self.ws, &self.topic, event, payload).await;
    }
}

use super::handler_trait::WsHandler;
use super::serve::{WsServerOptions, serve_topic};
use crate::state::AppState;
use axum::{
    extract::{WebSocketUpgrade, ws::WebSocket},
    response::IntoResponse,
};
use std::sync::Arc;

/// Completes a WebSocket upgrade and serves `topic` on the new socket.
///
/// `account_id` enables presence tracking for the topic when set.
pub fn ws_route<H, F>(
    ws: WebSocketUpgrade,
    state: AppState,
    account_id: Option<i64>,
    topic_fn: F,
    handler: Arc<H>,
    opts: WsServerOptions,
) -> impl IntoResponse
where
    H: WsHandler,
    F: FnOnce() -> String + Send + 'static,
{
    let manager = state.ws_clone();

    ws.on_upgrade(move |socket: WebSocket| async move {
        let topic = topic_fn();
        serve_topic(socket, manager, topic, account_id, handler, opts).await;
    })
}

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::{sync::mpsc, time};

use super::WebSocketManager;
use super::handler_trait::WsHandler;
use super::runtime::WsContext;

pub struct WsServerOptions {
    pub ping_every_secs: u64,
    pub answer_app_ping: bool,
}

impl Default for WsServerOptions {
    fn default() -> Self {
        Self {
            ping_every_secs: 30,
            answer_app_ping: true,
        }
    }
}

/// Pumps a single socket: forwards topic broadcasts to the client, keeps the
/// connection alive with pings and dispatches parsed client messages to `handler`.
pub async fn serve_topic<H: WsHandler>(
    socket: WebSocket,
    manager: WebSocketManager,
    topic: String,
    account_id: Option<i64>,
    handler: Arc<H>,
    opts: WsServerOptions,
) {
    let mut rx = manager.subscribe(&topic).await;
    if let Some(id) = account_id {
        manager.register(&topic, id).await;
    }

    let (mut sink, mut socket_rx) = socket.split();

    let (out_tx, mut out_rx) = mpsc::channel::<Message>(64);
    let writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let ctx = WsContext::new(topic.clone(), account_id, manager.clone(), out_tx.clone());

    let forward_task = {
        let out_tx = out_tx.clone();
        let topic = topic.clone();
        tokio::spawn(async move {
            while let Ok(msg) = rx.recv().await {
                if out_tx.send(Message::Text(msg.into())).await.is_err() {
                    tracing::debug!(topic, "client gone while forwarding");
                    break;
                }
            }
        })
    };

    let ping_task = {
        let out_tx = out_tx.clone();
        let every = opts.ping_every_secs.max(1);
        tokio::spawn(async move {
            loop {
                time::sleep(std::time::Duration::from_secs(every)).await;
                if out_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        })
    };
    drop(out_tx);

    handler.on_open(&ctx).await;

    while let Some(Ok(msg)) = socket_rx.next().await {
        match msg {
            Message::Text(text) => {
                let raw = text.as_str();
                if opts.answer_app_ping && is_app_ping(raw) {
                    let pong = serde_json::json!({
                        "event": "pong",
                        "topic": ctx.topic,
                        "payload": {},
                        "ts": Utc::now().to_rfc3339(),
                    });
                    let _ = ctx.reply_text(pong.to_string()).await;
                    continue;
                }
                match serde_json::from_str::<H::In>(raw) {
                    Ok(parsed) => handler.on_message(&ctx, parsed).await,
                    Err(e) => tracing::warn!(topic = %ctx.topic, error = %e, "invalid ws message"),
                }
            }
            Message::Ping(payload) => {
                let _ = ctx.reply_pong(payload).await;
            }
            Message::Pong(_) => {}
            Message::Binary(_) => {
                tracing::warn!(topic = %ctx.topic, "ignoring binary frame");
            }
            Message::Close(_) => break,
        }
    }

    handler.on_close(&ctx).await;
    forward_task.abort();
    ping_task.abort();
    drop(ctx);
    let _ = writer_task.await;

    if let Some(id) = account_id {
        manager.unregister(&topic, id).await;
    }
    tracing::info!(topic, "ws session ended");
}

fn is_app_ping(raw: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(raw),
        Ok(Value::Object(map)) if map.get("type").and_then(Value::as_str) == Some("ping")
    )
}

#[cfg(test)]
mod tests {
    use super::is_app_ping;

    #[test]
    fn recognises_only_typed_ping_objects() {
        assert!(is_app_ping(r#"{"type":"ping"}"#));
        assert!(!is_app_ping(r#"{"type":"pong"}"#));
        assert!(!is_app_ping("ping"));
        assert!(!is_app_ping("[]"));
    }
}

use serde::Deserialize;
use util::ws::handler_trait::WsHandler;
use util::ws::runtime::WsContext;

/// Clients of a group topic only listen; anything they send besides the
/// app-level ping is logged and dropped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActiveGroupIncoming {
    Hello,
}

pub struct ActiveGroupWsHandler;

impl WsHandler for ActiveGroupWsHandler {
    type In = ActiveGroupIncoming;

    async fn on_open(&self, ctx: &WsContext) {
        tracing::debug!(topic = %ctx.topic, account = ?ctx.account_id, "group watcher connected");
    }

    async fn on_message(&self, ctx: &WsContext, msg: Self::In) {
        match msg {
            ActiveGroupIncoming::Hello => {
                let watchers = ctx.ws.watchers(&ctx.topic).await;
                ctx.emit("hello", &serde_json::json!({ "watchers": watchers })).await;
            }
        }
    }
}

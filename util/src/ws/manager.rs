//! Topic-based broadcast hub for WebSocket clients.
//!
//! Each topic owns a Tokio broadcast channel created on first subscription.
//! Presence is tracked per topic as a refcount of account ids so a dashboard
//! opened in several tabs counts once.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

type Topic = String;
type Sender = broadcast::Sender<String>;
type Receiver = broadcast::Receiver<String>;

const CHANNEL_CAPACITY: usize = 128;

#[derive(Clone, Default)]
pub struct WebSocketManager {
    inner: Arc<RwLock<HashMap<Topic, Sender>>>,
    presence: Arc<RwLock<HashMap<Topic, HashMap<i64, usize>>>>,
}

impl WebSocketManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the given topic, creating it if necessary.
    pub async fn subscribe(&self, topic: &str) -> Receiver {
        let mut map = self.inner.write().await;
        map.entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Broadcasts a message to all subscribers of `topic`.
    ///
    /// Unknown topics are a no-op. A topic left without receivers is dropped.
    pub async fn broadcast<T: Into<String>>(&self, topic: &str, msg: T) {
        let mut map = self.inner.write().await;
        if let Some(sender) = map.get(topic) {
            let _ = sender.send(msg.into());
            if sender.receiver_count() == 0 {
                tracing::debug!(topic, "dropping topic without subscribers");
                map.remove(topic);
            }
        }
    }

    /// Returns `true` while at least one receiver exists for `topic`.
    pub async fn has_topic(&self, topic: &str) -> bool {
        self.inner.read().await.contains_key(topic)
    }

    /// Increments presence for `account_id` on `topic`.
    pub async fn register(&self, topic: &str, account_id: i64) {
        let mut p = self.presence.write().await;
        let entry = p.entry(topic.to_string()).or_default();
        *entry.entry(account_id).or_insert(0) += 1;
    }

    /// Decrements presence for `account_id` on `topic`.
    pub async fn unregister(&self, topic: &str, account_id: i64) {
        let mut p = self.presence.write().await;
        if let Some(accounts) = p.get_mut(topic) {
            if let Some(cnt) = accounts.get_mut(&account_id) {
                if *cnt > 1 {
                    *cnt -= 1;
                } else {
                    accounts.remove(&account_id);
                }
            }
            if accounts.is_empty() {
                p.remove(topic);
            }
        }
    }

    /// Number of distinct accounts currently watching `topic`.
    pub async fn watchers(&self, topic: &str) -> usize {
        self.presence
            .read()
            .await
            .get(topic)
            .map(|m| m.len())
            .unwrap_or(0)
    }
}

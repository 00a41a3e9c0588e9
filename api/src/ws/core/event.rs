use serde::Serialize;

/// An event knows its stable name and the topic it belongs to.
pub trait Event: Serialize {
    const NAME: &'static str;
    /// Canonical topic path, e.g. `active_group:7`.
    fn topic_path(&self) -> String;
}

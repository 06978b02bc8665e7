use crate::utils::error::Result;
use async_trait::async_trait;
use crossterm::event::KeyEvent;

/// Outbound side: a connected pub/sub client.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Fire-and-forget publish (QoS 0, not retained).
    async fn publish(&self, topic: &str, payload: &str) -> Result<()>;
    async fn disconnect(&self) -> Result<()>;
}

/// Inbound side: a sequence of key presses.
///
/// `Ok(None)` means the source is exhausted and will not produce more keys.
#[async_trait]
pub trait KeySource: Send {
    async fn next_key(&mut self) -> Result<Option<KeyEvent>>;
}

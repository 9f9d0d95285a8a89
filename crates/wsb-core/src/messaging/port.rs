use async_trait::async_trait;

use crate::{domain::MessageRef, messaging::types::StatusUpdate, Result};

/// Outbound capability of the external protocol client.
///
/// The gateway adapter is the production implementation; dispatcher tests
/// substitute a recording mock. Implementations map their transport errors
/// into [`crate::Error`] so a failed send is a single uniform outcome.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Broadcast a status update visible to the account's contacts.
    async fn publish_status(&self, update: &StatusUpdate) -> Result<()>;

    /// Attach an emoji reaction to a prior message.
    async fn send_reaction(&self, target: &MessageRef, emoji: &str) -> Result<()>;
}

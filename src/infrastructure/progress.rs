//! Progress sink adapters.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::entities::ChannelId;
use crate::domain::ports::{ProgressSink, PublishPort};

/// Progress sink that prints to standard output, for CLI invocations.
pub struct ConsoleProgressSink;

#[async_trait]
impl ProgressSink for ConsoleProgressSink {
    async fn respond(&self, text: &str) {
        println!("{text}");
    }
}

/// Progress sink that mirrors updates into a Discord channel, standing in
/// for the slash-command response context.
pub struct ChannelProgressSink {
    publish: Arc<dyn PublishPort>,
    channel: ChannelId,
}

impl ChannelProgressSink {
    /// Creates a sink posting into the given channel.
    #[must_use]
    pub const fn new(publish: Arc<dyn PublishPort>, channel: ChannelId) -> Self {
        Self { publish, channel }
    }
}

#[async_trait]
impl ProgressSink for ChannelProgressSink {
    async fn respond(&self, text: &str) {
        // Progress delivery is best effort; a failed update must never
        // disturb the run it reports on.
        if let Err(e) = self.publish.send_text(self.channel, text).await {
            warn!(channel = %self.channel, error = %e, "Failed to deliver progress update");
        }
    }
}

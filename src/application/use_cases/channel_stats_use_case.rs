//! Channel statistics: totals for messages, image links, and attachments.

use std::sync::Arc;

use tracing::info;

use crate::application::services::{images_urls, HistoryStream, IMAGE_CONTENT_TYPES};
use crate::domain::entities::{ChannelId, HistoryWindow};
use crate::domain::errors::CommandError;
use crate::domain::ports::HistoryPort;

/// Totals over a channel's full history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Messages in the channel.
    pub messages: usize,
    /// Image links found in message text.
    pub image_links: usize,
    /// Attachments with an image content type.
    pub image_attachments: usize,
}

impl ChannelStats {
    /// Human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Total messages: {}\nImages: {}\nAttachments: {}",
            self.messages, self.image_links, self.image_attachments
        )
    }
}

/// Computes [`ChannelStats`] by streaming the history, never buffering it.
pub struct ChannelStatsUseCase {
    history: Arc<dyn HistoryPort>,
}

impl ChannelStatsUseCase {
    /// Creates the use case over the history port.
    #[must_use]
    pub const fn new(history: Arc<dyn HistoryPort>) -> Self {
        Self { history }
    }

    /// Streams the channel's entire history and counts image content.
    ///
    /// # Errors
    /// Returns a [`CommandError`] when a history page cannot be fetched.
    pub async fn execute(&self, origin: ChannelId) -> Result<ChannelStats, CommandError> {
        let mut stream =
            HistoryStream::new(Arc::clone(&self.history), HistoryWindow::new(origin));

        let mut stats = ChannelStats::default();
        while let Some(message) = stream.next().await? {
            stats.messages += 1;
            stats.image_links += images_urls(message.content()).len();
            stats.image_attachments += message
                .attachments()
                .iter()
                .filter(|a| {
                    a.content_type()
                        .is_some_and(|ct| IMAGE_CONTENT_TYPES.contains(&ct))
                })
                .count();
        }

        info!(
            channel = %origin,
            messages = stats.messages,
            links = stats.image_links,
            attachments = stats.image_attachments,
            "Computed channel statistics"
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::entities::{Attachment, Message, MessageAuthor};
    use crate::domain::ports::mocks::MockHistoryPort;

    const ORIGIN: ChannelId = ChannelId(100);

    fn message(id: u64, content: &str) -> Message {
        Message::new(
            id,
            ORIGIN,
            MessageAuthor::new("1", "artist", "0001", false),
            content,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_counts_links_and_attachments() {
        let history = Arc::new(
            MockHistoryPort::new().with_messages(vec![
                message(1, "https://a.com/x.png https://a.com/y.jpg"),
                message(2, "no images"),
                message(3, "").with_attachments(vec![
                    Attachment::new("1", "a.png", 10, "https://cdn.test/a")
                        .with_content_type("image/png"),
                    Attachment::new("2", "b.txt", 10, "https://cdn.test/b")
                        .with_content_type("text/plain"),
                ]),
            ]),
        );

        let stats = ChannelStatsUseCase::new(history)
            .execute(ORIGIN)
            .await
            .unwrap();

        assert_eq!(
            stats,
            ChannelStats {
                messages: 3,
                image_links: 2,
                image_attachments: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_channel() {
        let stats = ChannelStatsUseCase::new(Arc::new(MockHistoryPort::new()))
            .execute(ORIGIN)
            .await
            .unwrap();
        assert_eq!(stats, ChannelStats::default());
        assert!(stats.summary().contains("Total messages: 0"));
    }
}

//! Port for reading a channel's message history.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{Attachment, Channel, ChannelId, Message, MessageId};
use crate::domain::errors::PlatformError;

/// Port for paginated history retrieval and attachment download.
///
/// `fetch_page` is the pagination primitive the streaming history source is
/// built on: implementations return at most `limit` messages with ids
/// strictly greater than `after`, ordered oldest first, regardless of the
/// wire order the platform uses.
#[async_trait]
pub trait HistoryPort: Send + Sync {
    /// Fetches channel metadata (guild, last message id).
    async fn fetch_channel(&self, channel_id: ChannelId) -> Result<Channel, PlatformError>;

    /// Fetches a single message by id.
    async fn fetch_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<Message, PlatformError>;

    /// Fetches one page of history after the given cursor, oldest first.
    async fn fetch_page(
        &self,
        channel_id: ChannelId,
        after: u64,
        limit: u8,
    ) -> Result<Vec<Message>, PlatformError>;

    /// Downloads an attachment's binary content.
    async fn download_attachment(&self, attachment: &Attachment) -> Result<Bytes, PlatformError>;
}

/// Scripted mock implementation.
#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Scripted in-memory history port for testing.
    pub struct MockHistoryPort {
        channels: HashMap<u64, Channel>,
        messages: Vec<Message>,
        failing_urls: Vec<String>,
        fail_after_pages: Option<usize>,
        pages_fetched: AtomicUsize,
    }

    impl MockHistoryPort {
        /// Creates an empty mock.
        #[must_use]
        pub fn new() -> Self {
            Self {
                channels: HashMap::new(),
                messages: Vec::new(),
                failing_urls: Vec::new(),
                fail_after_pages: None,
                pages_fetched: AtomicUsize::new(0),
            }
        }

        /// Registers a channel.
        #[must_use]
        pub fn with_channel(mut self, channel: Channel) -> Self {
            self.channels.insert(channel.id().as_u64(), channel);
            self
        }

        /// Seeds history messages; they are served sorted by id.
        #[must_use]
        pub fn with_messages(mut self, mut messages: Vec<Message>) -> Self {
            messages.sort_by_key(Message::id);
            self.messages = messages;
            self
        }

        /// Marks an attachment url as failing to download.
        #[must_use]
        pub fn with_failing_url(mut self, url: impl Into<String>) -> Self {
            self.failing_urls.push(url.into());
            self
        }

        /// Makes every page fetch past the given count fail.
        #[must_use]
        pub const fn with_page_failure_after(mut self, pages: usize) -> Self {
            self.fail_after_pages = Some(pages);
            self
        }

        /// Number of pages served so far.
        pub fn pages_fetched(&self) -> usize {
            self.pages_fetched.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HistoryPort for MockHistoryPort {
        async fn fetch_channel(&self, channel_id: ChannelId) -> Result<Channel, PlatformError> {
            self.channels
                .get(&channel_id.as_u64())
                .cloned()
                .ok_or_else(|| PlatformError::not_found(format!("channel {channel_id}")))
        }

        async fn fetch_message(
            &self,
            channel_id: ChannelId,
            message_id: MessageId,
        ) -> Result<Message, PlatformError> {
            self.messages
                .iter()
                .find(|m| m.channel_id() == channel_id && m.id() == message_id)
                .cloned()
                .ok_or_else(|| PlatformError::not_found(format!("message {message_id}")))
        }

        async fn fetch_page(
            &self,
            channel_id: ChannelId,
            after: u64,
            limit: u8,
        ) -> Result<Vec<Message>, PlatformError> {
            let page_number = self.pages_fetched.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(limit) = self.fail_after_pages
                && page_number > limit
            {
                return Err(PlatformError::network("mock history failure"));
            }
            Ok(self
                .messages
                .iter()
                .filter(|m| m.channel_id() == channel_id && m.id().as_u64() > after)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn download_attachment(
            &self,
            attachment: &Attachment,
        ) -> Result<Bytes, PlatformError> {
            if self.failing_urls.iter().any(|u| u == attachment.url()) {
                return Err(PlatformError::network("mock download failure"));
            }
            Ok(Bytes::from(attachment.filename().as_bytes().to_vec()))
        }
    }
}

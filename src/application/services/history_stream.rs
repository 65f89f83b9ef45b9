//! Lazy, oldest-first stream over a channel's paginated history.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{HistoryWindow, Message};
use crate::domain::errors::PlatformError;
use crate::domain::ports::HistoryPort;

/// Messages fetched per page, the platform maximum.
pub const PAGE_SIZE: u8 = 100;

/// Streams a [`HistoryWindow`] one message at a time, oldest first,
/// paginating transparently. At most one page is buffered, so the stream
/// stays flat on channels with tens of thousands of messages.
pub struct HistoryStream {
    port: Arc<dyn HistoryPort>,
    window: HistoryWindow,
    cursor: u64,
    buffer: VecDeque<Message>,
    exhausted: bool,
}

impl HistoryStream {
    /// Creates a stream over the given window.
    #[must_use]
    pub fn new(port: Arc<dyn HistoryPort>, window: HistoryWindow) -> Self {
        let cursor = window.after().unwrap_or(0);
        Self {
            port,
            window,
            cursor,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Yields the next message in the window, or `None` once the window is
    /// exhausted.
    ///
    /// # Errors
    /// Returns the platform error if a page fetch fails; the stream can be
    /// polled again afterwards and will retry the same page.
    pub async fn next(&mut self) -> Result<Option<Message>, PlatformError> {
        loop {
            if let Some(message) = self.buffer.pop_front() {
                return Ok(Some(message));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fill_buffer().await?;
        }
    }

    async fn fill_buffer(&mut self) -> Result<(), PlatformError> {
        let page = self
            .port
            .fetch_page(self.window.origin(), self.cursor, PAGE_SIZE)
            .await?;

        debug!(
            channel = %self.window.origin(),
            after = self.cursor,
            received = page.len(),
            "Fetched history page"
        );

        if page.len() < PAGE_SIZE as usize {
            self.exhausted = true;
        }
        if let Some(last) = page.last() {
            self.cursor = last.id().as_u64();
        }

        for message in page {
            if let Some(before) = self.window.before()
                && message.id().as_u64() >= before
            {
                // Pages ascend, so the first message past the upper bound
                // ends the window.
                self.exhausted = true;
                break;
            }
            self.buffer.push_back(message);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::entities::{ChannelId, MessageAuthor};
    use crate::domain::ports::mocks::MockHistoryPort;

    const ORIGIN: ChannelId = ChannelId(100);

    fn message(id: u64) -> Message {
        Message::new(
            id,
            ORIGIN,
            MessageAuthor::new("1", "artist", "0001", false),
            format!("message {id}"),
            Utc::now(),
        )
    }

    async fn collect_ids(mut stream: HistoryStream) -> Vec<u64> {
        let mut ids = Vec::new();
        while let Some(message) = stream.next().await.unwrap() {
            ids.push(message.id().as_u64());
        }
        ids
    }

    #[tokio::test]
    async fn test_streams_oldest_first_across_pages() {
        let count = PAGE_SIZE as u64 * 2 + 30;
        let port = Arc::new(
            MockHistoryPort::new().with_messages((1..=count).map(message).collect()),
        );
        let stream = HistoryStream::new(port.clone(), HistoryWindow::new(ORIGIN));

        let ids = collect_ids(stream).await;

        assert_eq!(ids.len(), count as usize);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        // Two full pages plus the final short one.
        assert_eq!(port.pages_fetched(), 3);
    }

    #[tokio::test]
    async fn test_respects_after_and_before_cursors() {
        let port =
            Arc::new(MockHistoryPort::new().with_messages((1..=50).map(message).collect()));
        let window = HistoryWindow::new(ORIGIN).with_after(10).with_before(20);
        let ids = collect_ids(HistoryStream::new(port, window)).await;

        assert_eq!(ids, (11..=19).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_before_cursor_stops_mid_page() {
        let count = PAGE_SIZE as u64 * 3;
        let port = Arc::new(
            MockHistoryPort::new().with_messages((1..=count).map(message).collect()),
        );
        let window = HistoryWindow::new(ORIGIN).with_before(150);
        let stream = HistoryStream::new(port.clone(), window);

        let ids = collect_ids(stream).await;

        assert_eq!(ids, (1..=149).collect::<Vec<_>>());
        // The bound lands inside the second page; no further pages fetched.
        assert_eq!(port.pages_fetched(), 2);
    }

    #[tokio::test]
    async fn test_empty_channel_yields_nothing() {
        let port = Arc::new(MockHistoryPort::new());
        let ids = collect_ids(HistoryStream::new(port, HistoryWindow::new(ORIGIN))).await;
        assert!(ids.is_empty());
    }
}

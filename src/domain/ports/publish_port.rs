//! Port for sending content to the destination thread.

use async_trait::async_trait;

use crate::domain::entities::{AttachmentFile, ChannelId};
use crate::domain::errors::PlatformError;

/// Port for pushing text and files to a destination channel or thread.
#[async_trait]
pub trait PublishPort: Send + Sync {
    /// Sends a text message.
    async fn send_text(&self, channel_id: ChannelId, content: &str) -> Result<(), PlatformError>;

    /// Uploads a single attachment file.
    async fn send_file(
        &self,
        channel_id: ChannelId,
        file: &AttachmentFile,
    ) -> Result<(), PlatformError>;
}

/// Recording mock implementation.
#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// One payload recorded by [`MockPublishPort`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SentPayload {
        /// Text content sent to a channel.
        Text(String),
        /// A file upload, by filename.
        File(String),
    }

    /// Recording publish port for testing.
    pub struct MockPublishPort {
        sent: Mutex<Vec<SentPayload>>,
        failing_files: Vec<String>,
        send_delay: Option<Duration>,
    }

    impl MockPublishPort {
        /// Creates a mock that accepts everything.
        #[must_use]
        pub fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failing_files: Vec::new(),
                send_delay: None,
            }
        }

        /// Marks a filename as failing on upload.
        #[must_use]
        pub fn with_failing_file(mut self, filename: impl Into<String>) -> Self {
            self.failing_files.push(filename.into());
            self
        }

        /// Adds an artificial delay to every send, to let a queue fill up.
        #[must_use]
        pub const fn with_send_delay(mut self, delay: Duration) -> Self {
            self.send_delay = Some(delay);
            self
        }

        /// Everything sent so far, in order.
        pub fn sent(&self) -> Vec<SentPayload> {
            self.sent.lock().unwrap().clone()
        }

        async fn pace(&self) {
            if let Some(delay) = self.send_delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl PublishPort for MockPublishPort {
        async fn send_text(
            &self,
            _channel_id: ChannelId,
            content: &str,
        ) -> Result<(), PlatformError> {
            self.pace().await;
            self.sent
                .lock()
                .unwrap()
                .push(SentPayload::Text(content.to_owned()));
            Ok(())
        }

        async fn send_file(
            &self,
            _channel_id: ChannelId,
            file: &AttachmentFile,
        ) -> Result<(), PlatformError> {
            self.pace().await;
            if self.failing_files.iter().any(|f| f == file.filename()) {
                return Err(PlatformError::api(413, "mock upload rejection"));
            }
            self.sent
                .lock()
                .unwrap()
                .push(SentPayload::File(file.filename().to_owned()));
            Ok(())
        }
    }
}

//! Turns raw messages into publishable artist messages.

use std::sync::Arc;

use tracing::debug;

use super::{images_urls, is_image_attachment};
use crate::domain::entities::{ArtistMessage, AttachmentFile, GuildId, Message, MessageRef};
use crate::domain::errors::PlatformError;
use crate::domain::ports::HistoryPort;

/// Decides whether a raw message carries image content and, if so,
/// materializes it: extracts URLs from the text and downloads qualifying
/// attachments into memory.
#[derive(Clone)]
pub struct CandidateBuilder {
    history: Arc<dyn HistoryPort>,
    guild: Option<GuildId>,
}

impl CandidateBuilder {
    /// Creates a builder; `guild` is used for source permalinks.
    #[must_use]
    pub const fn new(history: Arc<dyn HistoryPort>, guild: Option<GuildId>) -> Self {
        Self { history, guild }
    }

    /// Builds an [`ArtistMessage`] from a raw message, or `None` when the
    /// message carries no image content.
    ///
    /// Non-default message kinds and bot authors are skipped outright.
    ///
    /// # Errors
    /// Returns the platform error if a qualifying attachment fails to
    /// download.
    pub async fn build(&self, message: &Message) -> Result<Option<ArtistMessage>, PlatformError> {
        if !message.kind().is_default() || message.author().is_bot() {
            return Ok(None);
        }

        let urls = images_urls(message.content());

        let mut files = Vec::new();
        for attachment in message.attachments() {
            if !is_image_attachment(attachment) {
                continue;
            }
            let bytes = self.history.download_attachment(attachment).await?;
            files.push(AttachmentFile::new(
                attachment.filename(),
                attachment.content_type().map(str::to_owned),
                bytes,
            ));
        }

        if urls.is_empty() && files.is_empty() {
            return Ok(None);
        }

        debug!(
            message_id = %message.id(),
            urls = urls.len(),
            files = files.len(),
            "Built artist message"
        );

        let source = MessageRef::new(message.id(), message.channel_id(), self.guild);
        Ok(ArtistMessage::new(
            message.author().identity(),
            message.timestamp(),
            urls,
            files,
            source,
        ))
    }
}

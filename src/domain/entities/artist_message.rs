//! Normalized record for one qualifying source message.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::{ChannelId, GuildId, MessageId};

/// An attachment payload materialized for re-upload, independently sendable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    filename: String,
    content_type: Option<String>,
    bytes: Bytes,
}

#[allow(missing_docs)]
impl AttachmentFile {
    #[must_use]
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// Back-reference to the originating message, used for logging and error
/// reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    message_id: MessageId,
    channel_id: ChannelId,
    guild_id: Option<GuildId>,
}

impl MessageRef {
    /// Creates a reference to a message in a channel.
    #[must_use]
    pub const fn new(
        message_id: MessageId,
        channel_id: ChannelId,
        guild_id: Option<GuildId>,
    ) -> Self {
        Self {
            message_id,
            channel_id,
            guild_id,
        }
    }

    /// Jump link to the original message.
    #[must_use]
    pub fn permalink(&self) -> String {
        match self.guild_id {
            Some(guild) => format!(
                "https://discord.com/channels/{guild}/{}/{}",
                self.channel_id, self.message_id
            ),
            None => format!(
                "https://discord.com/channels/@me/{}/{}",
                self.channel_id, self.message_id
            ),
        }
    }
}

/// One source message's image payload with authorship and timestamp
/// metadata, ready to be republished.
///
/// Only built when there is something to publish: `urls` or `files` is
/// always non-empty.
#[derive(Debug, Clone)]
pub struct ArtistMessage {
    author: String,
    when: DateTime<Utc>,
    urls: Vec<String>,
    files: Vec<AttachmentFile>,
    source: MessageRef,
}

impl ArtistMessage {
    /// Builds an artist message; returns `None` when there is no image
    /// content to carry.
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        when: DateTime<Utc>,
        urls: Vec<String>,
        files: Vec<AttachmentFile>,
        source: MessageRef,
    ) -> Option<Self> {
        if urls.is_empty() && files.is_empty() {
            return None;
        }
        Some(Self {
            author: author.into(),
            when,
            urls,
            files,
            source,
        })
    }

    /// Display identity of the original author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Original creation timestamp (UTC).
    #[must_use]
    pub const fn when(&self) -> DateTime<Utc> {
        self.when
    }

    /// Extracted image URLs, in source-text order.
    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Materialized image attachments, in source order.
    #[must_use]
    pub fn files(&self) -> &[AttachmentFile] {
        &self.files
    }

    /// Back-reference to the originating message.
    #[must_use]
    pub const fn source(&self) -> &MessageRef {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_ref() -> MessageRef {
        MessageRef::new(MessageId(42), ChannelId(100), Some(GuildId(7)))
    }

    #[test]
    fn test_rejects_empty_content() {
        let message = ArtistMessage::new("a#1", Utc::now(), Vec::new(), Vec::new(), source_ref());
        assert!(message.is_none());
    }

    #[test]
    fn test_accepts_urls_only() {
        let message = ArtistMessage::new(
            "a#1",
            Utc::now(),
            vec!["https://example.com/a.png".to_owned()],
            Vec::new(),
            source_ref(),
        );
        assert!(message.is_some());
    }

    #[test]
    fn test_guild_permalink() {
        assert_eq!(
            source_ref().permalink(),
            "https://discord.com/channels/7/100/42"
        );
    }

    #[test]
    fn test_dm_permalink_falls_back() {
        let reference = MessageRef::new(MessageId(42), ChannelId(100), None);
        assert_eq!(
            reference.permalink(),
            "https://discord.com/channels/@me/100/42"
        );
    }
}

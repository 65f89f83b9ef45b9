use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ChannelId;

/// Unique identifier for a Discord message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Discord message type, collapsed to what the copy pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MessageKind {
    /// A regular user message.
    #[default]
    Default,
    /// A reply to another message.
    Reply,
    /// Any other (system) message type, with the raw discriminant.
    System(u8),
}

impl From<u8> for MessageKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Default,
            19 => Self::Reply,
            other => Self::System(other),
        }
    }
}

impl MessageKind {
    /// Returns true for the plain "default" message type.
    ///
    /// Only default messages enter the copy pipeline; replies and system
    /// messages are skipped.
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

/// Discord message attachment metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Attachment {
    id: String,
    filename: String,
    size: u64,
    url: String,
    content_type: Option<String>,
}

#[allow(missing_docs)]
impl Attachment {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        size: u64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            size,
            url: url.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// Author of a Discord message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct MessageAuthor {
    id: String,
    username: String,
    discriminator: String,
    nickname: Option<String>,
    bot: bool,
}

#[allow(missing_docs)]
impl MessageAuthor {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        discriminator: impl Into<String>,
        bot: bool,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: discriminator.into(),
            nickname: None,
            bot,
        }
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Guild nickname, when the author is a member with one set.
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }

    /// Stable identity used both in the destination banner and in error
    /// messages: `name#discriminator` plus `/nickname` when one is set.
    #[must_use]
    pub fn identity(&self) -> String {
        let nick = self
            .nickname
            .as_deref()
            .map(|n| format!("/{n}"))
            .unwrap_or_default();
        format!("{}#{}{nick}", self.username, self.discriminator)
    }
}

/// Discord message entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Message {
    id: MessageId,
    channel_id: ChannelId,
    author: MessageAuthor,
    content: String,
    timestamp: DateTime<Utc>,
    kind: MessageKind,
    attachments: Vec<Attachment>,
}

#[allow(missing_docs)]
impl Message {
    #[must_use]
    pub fn new(
        id: impl Into<MessageId>,
        channel_id: impl Into<ChannelId>,
        author: MessageAuthor,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            author,
            content: content.into(),
            timestamp,
            kind: MessageKind::Default,
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    #[must_use]
    pub const fn author(&self) -> &MessageAuthor {
        &self.author
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_author() -> MessageAuthor {
        MessageAuthor::new("123", "testuser", "4856", false)
    }

    #[test]
    fn test_message_creation() {
        let message = Message::new(
            1_u64,
            100_u64,
            create_test_author(),
            "Hello, world!",
            Utc::now(),
        );

        assert_eq!(message.id().as_u64(), 1);
        assert_eq!(message.channel_id().as_u64(), 100);
        assert_eq!(message.content(), "Hello, world!");
        assert!(message.kind().is_default());
        assert!(message.attachments().is_empty());
    }

    #[test]
    fn test_message_kind_from_raw() {
        assert_eq!(MessageKind::from(0), MessageKind::Default);
        assert_eq!(MessageKind::from(19), MessageKind::Reply);
        assert_eq!(MessageKind::from(7), MessageKind::System(7));
        assert!(!MessageKind::Reply.is_default());
    }

    #[test]
    fn test_author_identity() {
        let plain = create_test_author();
        assert_eq!(plain.identity(), "testuser#4856");

        let member = create_test_author().with_nickname("painter");
        assert_eq!(member.identity(), "testuser#4856/painter");
    }
}

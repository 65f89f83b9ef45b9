//! Discord API response structures and their mapping into domain entities.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::{Attachment, Channel, Message, MessageAuthor, MessageKind};
use crate::domain::errors::PlatformError;

/// Discord API channel response structure.
#[derive(Debug, Deserialize)]
pub struct ChannelResponse {
    /// Channel ID.
    pub id: String,
    /// Owning guild ID, absent for DM channels.
    pub guild_id: Option<String>,
    /// Channel name.
    pub name: Option<String>,
    /// ID of the most recent message.
    pub last_message_id: Option<String>,
}

/// Discord API message author structure.
#[derive(Debug, Deserialize)]
pub struct AuthorResponse {
    /// User ID.
    pub id: String,
    /// Username.
    pub username: String,
    /// Discriminator tag.
    pub discriminator: String,
    /// Whether the author is a bot.
    #[serde(default)]
    pub bot: bool,
}

/// Guild member fields attached to a message.
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    /// Guild nickname.
    pub nick: Option<String>,
}

/// Discord API attachment structure.
#[derive(Debug, Deserialize)]
pub struct AttachmentResponse {
    /// Attachment ID.
    pub id: String,
    /// Original filename.
    pub filename: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// CDN download url.
    pub url: String,
    /// Declared content type.
    pub content_type: Option<String>,
}

/// Discord API message structure.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    /// Message ID.
    pub id: String,
    /// Channel the message belongs to.
    pub channel_id: String,
    /// Message author.
    pub author: AuthorResponse,
    /// Guild member fields, present on guild messages.
    pub member: Option<MemberResponse>,
    /// Text content.
    #[serde(default)]
    pub content: String,
    /// Creation timestamp, ISO 8601.
    pub timestamp: String,
    /// Raw message type discriminant.
    #[serde(rename = "type", default)]
    pub kind: u8,
    /// Attachments.
    #[serde(default)]
    pub attachments: Vec<AttachmentResponse>,
}

/// Discord API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from Discord.
    pub message: String,
}

fn parse_id(raw: &str, what: &str) -> Result<u64, PlatformError> {
    raw.parse()
        .map_err(|_| PlatformError::invalid_response(format!("non-numeric {what} id: {raw}")))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, PlatformError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PlatformError::invalid_response(format!("bad timestamp {raw}: {e}")))
}

impl ChannelResponse {
    /// Maps into the domain channel.
    ///
    /// # Errors
    /// Returns `InvalidResponse` when ids are not numeric.
    pub fn into_domain(self) -> Result<Channel, PlatformError> {
        let mut channel = Channel::new(parse_id(&self.id, "channel")?);
        if let Some(guild_id) = self.guild_id {
            channel = channel.with_guild(parse_id(&guild_id, "guild")?);
        }
        if let Some(name) = self.name {
            channel = channel.with_name(name);
        }
        if let Some(last) = self.last_message_id {
            channel = channel.with_last_message(parse_id(&last, "message")?);
        }
        Ok(channel)
    }
}

impl MessageResponse {
    /// Maps into the domain message.
    ///
    /// # Errors
    /// Returns `InvalidResponse` when ids or the timestamp are malformed.
    pub fn into_domain(self) -> Result<Message, PlatformError> {
        let mut author =
            MessageAuthor::new(self.author.id, self.author.username, self.author.discriminator, self.author.bot);
        if let Some(nick) = self.member.and_then(|m| m.nick) {
            author = author.with_nickname(nick);
        }

        let attachments = self
            .attachments
            .into_iter()
            .map(|a| {
                let mut attachment = Attachment::new(a.id, a.filename, a.size, a.url);
                if let Some(content_type) = a.content_type {
                    attachment = attachment.with_content_type(content_type);
                }
                attachment
            })
            .collect();

        Ok(Message::new(
            parse_id(&self.id, "message")?,
            parse_id(&self.channel_id, "channel")?,
            author,
            self.content,
            parse_timestamp(&self.timestamp)?,
        )
        .with_kind(MessageKind::from(self.kind))
        .with_attachments(attachments))
    }
}

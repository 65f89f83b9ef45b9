//! Invocation-time errors, reported to the user before any pipeline starts.

use thiserror::Error;

use super::PlatformError;
use crate::domain::entities::{ChannelId, MessageId};

/// Validation and resolution failures for a command invocation.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum CommandError {
    #[error("origin channel {channel} has no messages, nothing to process")]
    EmptyOriginChannel { channel: ChannelId },

    #[error("message {message} not found in channel {channel}")]
    MessageNotFound {
        channel: ChannelId,
        message: MessageId,
    },

    #[error("invalid history window: the start message is not older than the stop message")]
    InvalidWindow,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl CommandError {
    /// Creates an empty-origin error.
    #[must_use]
    pub const fn empty_origin(channel: ChannelId) -> Self {
        Self::EmptyOriginChannel { channel }
    }

    /// Creates a message-not-found error.
    #[must_use]
    pub const fn message_not_found(channel: ChannelId, message: MessageId) -> Self {
        Self::MessageNotFound { channel, message }
    }
}

//! The copy-images command: validation, window resolution, pipeline run.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::application::pipeline::{CopyPipeline, Publisher, RunStats};
use crate::application::services::{CandidateBuilder, HistoryStream};
use crate::domain::entities::{ChannelId, HistoryWindow, Message, MessageId, MessageRef};
use crate::domain::errors::{CommandError, PlatformError};
use crate::domain::ports::{HistoryPort, ProgressSink, PublishPort};
use crate::domain::snowflake;

/// Arguments for one copy invocation.
#[derive(Debug, Clone)]
pub struct CopyImagesRequest {
    /// Channel whose history is read.
    pub origin: ChannelId,
    /// Forum thread the images are copied into.
    pub destination: ChannelId,
    /// Message to start from; defaults to the oldest message.
    pub after_message: Option<MessageId>,
    /// Message to stop at; defaults to the most recent message.
    pub before_message: Option<MessageId>,
}

/// Copies image content from the origin channel's history into the
/// destination thread.
pub struct CopyImagesUseCase {
    history: Arc<dyn HistoryPort>,
    publish: Arc<dyn PublishPort>,
    progress: Arc<dyn ProgressSink>,
}

impl CopyImagesUseCase {
    /// Creates the use case over the given ports.
    #[must_use]
    pub const fn new(
        history: Arc<dyn HistoryPort>,
        publish: Arc<dyn PublishPort>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            history,
            publish,
            progress,
        }
    }

    /// Validates the request, announces the range, and runs the pipeline.
    ///
    /// Validation happens before any task is spawned: an empty origin
    /// channel, an unresolvable boundary message, or an inverted window
    /// fails fast with no partial state.
    ///
    /// # Errors
    /// Returns a [`CommandError`] on validation failure or when the
    /// platform cannot resolve the channel or boundary messages.
    pub async fn execute(
        &self,
        request: CopyImagesRequest,
        cancel: CancellationToken,
    ) -> Result<RunStats, CommandError> {
        let origin = self.history.fetch_channel(request.origin).await?;
        let Some(last_message_id) = origin.last_message_id() else {
            return Err(CommandError::empty_origin(request.origin));
        };

        let before_id = request.before_message.unwrap_or(last_message_id);
        let before = self.resolve_boundary(request.origin, before_id).await?;

        let after = match request.after_message {
            Some(id) => Some(self.resolve_boundary(request.origin, id).await?),
            None => None,
        };

        let mut window =
            HistoryWindow::new(request.origin).with_before(snowflake::before_cursor(before.timestamp()));
        if let Some(after) = &after {
            window = window.with_after(snowflake::after_cursor(after.timestamp()));
        }
        if window.is_inverted() {
            return Err(CommandError::InvalidWindow);
        }

        let guild = origin.guild_id();
        let start_label = after.as_ref().map_or_else(
            || "the first message".to_owned(),
            |m| MessageRef::new(m.id(), m.channel_id(), guild).permalink(),
        );
        let stop_label = MessageRef::new(before.id(), before.channel_id(), guild).permalink();
        self.progress
            .respond(&format!(
                "Exporting images of {} to <#{}> from message {stop_label} to {start_label}",
                origin.mention(),
                request.destination
            ))
            .await;

        info!(
            origin = %request.origin,
            destination = %request.destination,
            after = ?window.after(),
            before = ?window.before(),
            "Starting copy run"
        );

        let stream = HistoryStream::new(Arc::clone(&self.history), window);
        let builder = CandidateBuilder::new(Arc::clone(&self.history), guild);
        let publisher = Publisher::new(
            Arc::clone(&self.publish),
            Arc::clone(&self.progress),
            request.destination,
        );
        let pipeline = CopyPipeline::new(builder, publisher, Arc::clone(&self.progress));

        Ok(pipeline.run(stream, cancel).await)
    }

    async fn resolve_boundary(
        &self,
        channel: ChannelId,
        message_id: MessageId,
    ) -> Result<Message, CommandError> {
        self.history
            .fetch_message(channel, message_id)
            .await
            .map_err(|e| match e {
                PlatformError::NotFound { .. } => {
                    CommandError::message_not_found(channel, message_id)
                }
                other => CommandError::Platform(other),
            })
    }
}

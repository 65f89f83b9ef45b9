//! Pushes one artist message's content to the destination thread.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::entities::{ArtistMessage, ChannelId};
use crate::domain::ports::{ProgressSink, PublishPort};

/// What one [`Publisher::publish`] call managed to deliver.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishOutcome {
    /// Image links posted (all of them, or none if the text send failed).
    pub links_posted: usize,
    /// Attachment files uploaded.
    pub files_sent: usize,
    /// Attachment files that failed to upload.
    pub files_failed: usize,
}

/// Publishes artist messages to the destination thread.
///
/// The three steps (banner, links, files) are each fault-isolated: a failed
/// send is logged and, for attachments, reported through the sink with the
/// filename and source permalink, then publication moves on. A single
/// failure never aborts the batch.
#[derive(Clone)]
pub struct Publisher {
    port: Arc<dyn PublishPort>,
    progress: Arc<dyn ProgressSink>,
    destination: ChannelId,
}

impl Publisher {
    /// Creates a publisher for the destination thread.
    #[must_use]
    pub const fn new(
        port: Arc<dyn PublishPort>,
        progress: Arc<dyn ProgressSink>,
        destination: ChannelId,
    ) -> Self {
        Self {
            port,
            progress,
            destination,
        }
    }

    /// Publishes the banner, the extracted links, then each file.
    pub async fn publish(&self, item: &ArtistMessage) -> PublishOutcome {
        let mut outcome = PublishOutcome::default();

        let banner = format!(
            "``` Imported content from old channel ```\n{}\nOriginal date:<t:{}:f>",
            item.author(),
            item.when().timestamp()
        );
        if let Err(e) = self.port.send_text(self.destination, &banner).await {
            warn!(
                source = %item.source().permalink(),
                error = %e,
                "Failed to send banner"
            );
        }

        if !item.urls().is_empty() {
            let links = item.urls().join(" ");
            match self.port.send_text(self.destination, &links).await {
                Ok(()) => outcome.links_posted = item.urls().len(),
                Err(e) => warn!(
                    source = %item.source().permalink(),
                    error = %e,
                    "Failed to send image links"
                ),
            }
        }

        for file in item.files() {
            match self.port.send_file(self.destination, file).await {
                Ok(()) => outcome.files_sent += 1,
                Err(e) => {
                    outcome.files_failed += 1;
                    if e.is_recoverable() {
                        warn!(
                            filename = file.filename(),
                            source = %item.source().permalink(),
                            error = %e,
                            "Transient failure sending attachment"
                        );
                    } else {
                        error!(
                            filename = file.filename(),
                            source = %item.source().permalink(),
                            error = %e,
                            "Failed to send attachment"
                        );
                    }
                    self.progress
                        .respond(&format!(
                            "Error while sending attachment {} for message {}",
                            file.filename(),
                            item.source().permalink()
                        ))
                        .await;
                }
            }
        }

        outcome
    }
}

//! The bounded-concurrency copy pipeline.
//!
//! Three cooperative tasks share one bounded queue: a producer streaming
//! and filtering the history, a consumer publishing to the destination,
//! and a monitor reporting queue depth. The queue's capacity is the
//! backpressure bound: on large histories the producer suspends instead of
//! buffering.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::{PublishOutcome, Publisher};
use crate::application::services::{CandidateBuilder, HistoryStream};
use crate::domain::entities::ArtistMessage;
use crate::domain::errors::PlatformError;
use crate::domain::ports::ProgressSink;

/// Bounded queue capacity shared by producer and consumer.
pub const QUEUE_CAPACITY: usize = 20;

const MONITOR_INTERVAL: Duration = Duration::from_secs(30);

/// Counters accumulated over one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Artist messages published.
    pub messages: usize,
    /// Image links posted.
    pub links: usize,
    /// Attachment files uploaded.
    pub files_sent: usize,
    /// Attachment files that failed to upload.
    pub files_failed: usize,
}

impl RunStats {
    fn record(&mut self, outcome: PublishOutcome) {
        self.messages += 1;
        self.links += outcome.links_posted;
        self.files_sent += outcome.files_sent;
        self.files_failed += outcome.files_failed;
    }

    /// Human-readable summary line.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} message(s) copied: {} link(s), {} attachment(s) sent, {} failed",
            self.messages, self.links, self.files_sent, self.files_failed
        )
    }
}

/// Runs produce/consume/monitor over one bounded queue and coordinates
/// their shutdown.
#[derive(Clone)]
pub struct CopyPipeline {
    builder: CandidateBuilder,
    publisher: Publisher,
    progress: Arc<dyn ProgressSink>,
}

impl CopyPipeline {
    /// Creates a pipeline.
    #[must_use]
    pub const fn new(
        builder: CandidateBuilder,
        publisher: Publisher,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            builder,
            publisher,
            progress,
        }
    }

    /// Runs the pipeline to completion or cancellation and reports the
    /// elapsed time and counters through the sink.
    ///
    /// Shutdown order: the producer finishing closes the queue, the
    /// consumer drains what is left, and only then is the monitor stopped.
    /// No produced item is lost on a normal completion. Task failures are
    /// logged at the task boundary and never take down sibling tasks;
    /// cancellation of `cancel` stops all three cleanly.
    pub async fn run(&self, stream: HistoryStream, cancel: CancellationToken) -> RunStats {
        let start = Instant::now();
        // Scoped to this run so finishing normally does not cancel the
        // caller's token.
        let run_token = cancel.child_token();

        let (tx, rx) = mpsc::channel::<ArtistMessage>(QUEUE_CAPACITY);
        let depth = Arc::new(AtomicUsize::new(0));

        let producer = tokio::spawn(produce(
            stream,
            self.builder.clone(),
            tx,
            Arc::clone(&depth),
            run_token.clone(),
        ));
        let consumer = tokio::spawn(consume(
            rx,
            self.publisher.clone(),
            Arc::clone(&depth),
            run_token.clone(),
        ));
        let monitor_task = tokio::spawn(monitor(
            Arc::clone(&self.progress),
            Arc::clone(&depth),
            run_token.clone(),
        ));

        match producer.await {
            Ok(Ok(produced)) => debug!(produced, "Producer completed"),
            // A dead producer has dropped the queue sender, so the
            // consumer still drains and exits instead of stalling.
            Ok(Err(e)) => error!(error = %e, "Producer failed"),
            Err(e) => error!(error = %e, "Producer task panicked"),
        }

        let stats = match consumer.await {
            Ok(stats) => stats,
            Err(e) => {
                error!(error = %e, "Consumer task panicked");
                RunStats::default()
            }
        };

        run_token.cancel();
        if let Err(e) = monitor_task.await {
            error!(error = %e, "Monitor task panicked");
        }

        self.progress
            .respond(&format!(
                "Finished in {:.2} seconds: {}",
                start.elapsed().as_secs_f64(),
                stats.summary()
            ))
            .await;

        stats
    }
}

async fn produce(
    mut stream: HistoryStream,
    builder: CandidateBuilder,
    tx: mpsc::Sender<ArtistMessage>,
    depth: Arc<AtomicUsize>,
    cancel: CancellationToken,
) -> Result<usize, PlatformError> {
    let mut produced = 0;
    loop {
        let next = tokio::select! {
            () = cancel.cancelled() => {
                debug!("Producer cancelled");
                return Ok(produced);
            }
            next = stream.next() => next?,
        };
        let Some(raw) = next else { break };
        let Some(item) = builder.build(&raw).await? else {
            continue;
        };

        // Suspends when the queue is full; that suspension is the
        // backpressure bound.
        tokio::select! {
            () = cancel.cancelled() => {
                debug!("Producer cancelled");
                return Ok(produced);
            }
            sent = tx.send(item) => {
                if sent.is_err() {
                    // Consumer is gone; nothing left to produce for.
                    break;
                }
                depth.fetch_add(1, Ordering::SeqCst);
                produced += 1;
            }
        }
    }
    Ok(produced)
}

async fn consume(
    mut rx: mpsc::Receiver<ArtistMessage>,
    publisher: Publisher,
    depth: Arc<AtomicUsize>,
    cancel: CancellationToken,
) -> RunStats {
    let mut stats = RunStats::default();
    loop {
        let item = tokio::select! {
            () = cancel.cancelled() => {
                debug!("Consumer cancelled");
                break;
            }
            item = rx.recv() => item,
        };
        // None means the producer completed and the queue is drained.
        let Some(item) = item else { break };

        info!(
            source = %item.source().permalink(),
            links = item.urls().len(),
            attachments = item.files().len(),
            "Processing message"
        );
        let outcome = publisher.publish(&item).await;
        stats.record(outcome);
        depth.fetch_sub(1, Ordering::SeqCst);
    }
    stats
}

async fn monitor(progress: Arc<dyn ProgressSink>, depth: Arc<AtomicUsize>, cancel: CancellationToken) {
    // Report first, sleep after, so at least one depth report goes out
    // even on runs shorter than the interval.
    loop {
        progress
            .respond(&format!(
                "Queue size (update every {}sec): {}/{QUEUE_CAPACITY}",
                MONITOR_INTERVAL.as_secs(),
                depth.load(Ordering::SeqCst)
            ))
            .await;

        tokio::select! {
            () = cancel.cancelled() => {
                debug!("Monitor cancelled");
                break;
            }
            () = tokio::time::sleep(MONITOR_INTERVAL) => {}
        }
    }
}

mod history_port;
mod progress_port;
mod publish_port;

pub use history_port::HistoryPort;
pub use progress_port::ProgressSink;
pub use publish_port::PublishPort;

/// Hand-written port mocks for tests.
#[cfg(test)]
pub mod mocks {
    pub use super::history_port::mock::MockHistoryPort;
    pub use super::progress_port::mock::MockProgressSink;
    pub use super::publish_port::mock::{MockPublishPort, SentPayload};
}

//! Port for reporting progress back to whoever invoked the command.

use async_trait::async_trait;

/// Human-readable progress sink.
///
/// The pipeline is agnostic to how the text is delivered; delivery failures
/// are the adapter's problem and must not surface into the pipeline.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Delivers one progress or summary line.
    async fn respond(&self, text: &str);
}

/// Recording mock implementation.
#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Recording progress sink for testing.
    pub struct MockProgressSink {
        responses: Mutex<Vec<String>>,
    }

    impl MockProgressSink {
        /// Creates an empty sink.
        #[must_use]
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(Vec::new()),
            }
        }

        /// Everything responded so far, in order.
        pub fn responses(&self) -> Vec<String> {
            self.responses.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProgressSink for MockProgressSink {
        async fn respond(&self, text: &str) {
            self.responses.lock().unwrap().push(text.to_owned());
        }
    }
}

mod orchestrator;
mod publisher;

pub use orchestrator::{CopyPipeline, RunStats, QUEUE_CAPACITY};
pub use publisher::{PublishOutcome, Publisher};

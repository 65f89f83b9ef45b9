//! Artporter - copies image content from a Discord channel into a forum thread.
//!
//! The core is a bounded-concurrency producer/consumer pipeline that streams
//! a channel's paginated message history, extracts image payloads, and
//! republishes them to a destination thread with backpressure, periodic
//! progress reporting, and cooperative cancellation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services, the pipeline, and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for the Discord REST API.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

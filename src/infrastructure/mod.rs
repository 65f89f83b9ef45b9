/// CLI configuration.
pub mod config;
/// Discord REST API adapters.
pub mod discord;
/// Progress sink adapters.
pub mod progress;

pub use config::{AppConfig, Command, LogLevel};
pub use discord::DiscordRestClient;
pub use progress::{ChannelProgressSink, ConsoleProgressSink};

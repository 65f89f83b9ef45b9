//! Application configuration from the command line and environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration from CLI and environment.
#[derive(Debug, Parser)]
#[command(name = "artporter", version, about)]
pub struct AppConfig {
    /// Discord bot token.
    #[arg(long, env = "ARTPORTER_BOT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Log verbosity level.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log file path; logs go to stderr when unset.
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export images from one channel to a forum thread.
    Copy {
        /// Origin channel id.
        #[arg(long)]
        origin: u64,

        /// Destination forum thread id.
        #[arg(long)]
        destination: u64,

        /// Message id to start from; defaults to the oldest message.
        #[arg(long)]
        from_message: Option<u64>,

        /// Message id to stop at; defaults to the most recent message.
        #[arg(long)]
        before_message: Option<u64>,

        /// Channel to mirror progress updates into; defaults to stdout.
        #[arg(long)]
        status_channel: Option<u64>,
    },
    /// Statistics about a channel.
    Stats {
        /// Channel id to analyze.
        #[arg(long)]
        origin: u64,
    },
}

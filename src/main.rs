use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use artporter::application::use_cases::{ChannelStatsUseCase, CopyImagesRequest, CopyImagesUseCase};
use artporter::domain::ports::{HistoryPort, ProgressSink, PublishPort};
use artporter::infrastructure::{
    AppConfig, ChannelProgressSink, Command, ConsoleProgressSink, DiscordRestClient,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let config = AppConfig::parse();
    init_logging(&config)?;

    info!(version = artporter::VERSION, "Starting artporter");

    let client = Arc::new(DiscordRestClient::new(&config.token)?);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling run");
                cancel.cancel();
            }
        });
    }

    match config.command {
        Command::Copy {
            origin,
            destination,
            from_message,
            before_message,
            status_channel,
        } => {
            let history: Arc<dyn HistoryPort> = client.clone();
            let publish: Arc<dyn PublishPort> = client;
            let progress: Arc<dyn ProgressSink> = match status_channel {
                Some(id) => Arc::new(ChannelProgressSink::new(Arc::clone(&publish), id.into())),
                None => Arc::new(ConsoleProgressSink),
            };

            let request = CopyImagesRequest {
                origin: origin.into(),
                destination: destination.into(),
                after_message: from_message.map(Into::into),
                before_message: before_message.map(Into::into),
            };

            let stats = CopyImagesUseCase::new(history, publish, progress)
                .execute(request, cancel)
                .await?;
            info!(
                messages = stats.messages,
                links = stats.links,
                files_sent = stats.files_sent,
                files_failed = stats.files_failed,
                "Copy run complete"
            );
        }
        Command::Stats { origin } => {
            let stats = ChannelStatsUseCase::new(client).execute(origin.into()).await?;
            println!("{}", stats.summary());
        }
    }

    Ok(())
}

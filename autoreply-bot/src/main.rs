//! autoreply bot
//!
//! Streams platform events, picks moderately-followed authors and replies to
//! each of them once, at a paced rate.

mod config;
mod shutdown;

use autoreply_core::entities::ReplyCorpus;
use autoreply_core::events::RelayQueue;
use autoreply_core::processors::{ReplyScheduler, StreamConsumer, StreamProducer, Supervisor};
use autoreply_sdk::client::PlatformClient;
use clap::Parser;
use config::ConfigLoader;
use shutdown::shutdown_signal;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// autoreply - paced automated replies to a live event stream
#[derive(Parser, Debug)]
#[command(name = "autoreply-bot")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "autoreply.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting autoreply-bot v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration and check required files before anything starts
    let loaded = ConfigLoader::new(&args.config).load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(
        "Configuration loaded from {:?}, stream mode {}, parameters {:?}",
        args.config,
        loaded.stream.mode,
        loaded.files.parameters_file
    );

    let client = PlatformClient::new(loaded.credentials, loaded.client).map_err(|e| {
        tracing::error!("Failed to build platform client: {}", e);
        e
    })?;

    // Wire the pipeline
    let queue = RelayQueue::shared(loaded.pipeline.queue_capacity);
    let scheduler = ReplyScheduler::new(
        client.clone(),
        ReplyCorpus::new(loaded.files.status_file),
        loaded.pipeline.schedule,
    );
    let consumer = StreamConsumer::new(queue, scheduler, loaded.pipeline.dedup);
    let producer = StreamProducer::new(client, loaded.stream);

    let reason = Supervisor::new(producer, consumer, loaded.pipeline.poll_interval)
        .run(shutdown_signal())
        .await;

    tracing::info!(?reason, "autoreply-bot shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

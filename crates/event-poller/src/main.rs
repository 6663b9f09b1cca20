use anyhow::{Context, Result};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_poller::config::Config;
use event_poller::{
    DigestRenderer, DiscordClient, DisplayZone, EventSource, JsonFileStateStore,
    ReconcilingPublisher, Scheduler,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_poller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    tracing::info!("Starting event poller");

    let zone = DisplayZone::load(&config.timezone);
    tracing::info!("Rendering event times in {}", zone.name());
    let client =
        DiscordClient::new(&config.token, &config.api_base).context("Error creating discord client")?;
    let store = JsonFileStateStore::open(&config.state_file);

    let mut scheduler = Scheduler::new(
        EventSource::new(client.clone()),
        DigestRenderer::new(zone),
        ReconcilingPublisher::new(client, store),
        config.guild_id.as_str(),
        config.channel_id.as_str(),
        config.poll_interval(),
    );

    tokio::select! {
        err = scheduler.run() => {
            tracing::error!("Event poller stopped: {}", err);
            std::process::exit(1);
        }
        result = signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            tracing::info!("Shutdown signal received, stopping...");
        }
    }

    tracing::info!("Event poller stopped");
    Ok(())
}

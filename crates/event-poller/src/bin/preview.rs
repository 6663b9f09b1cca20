//! Print the digest the poller would post, without touching the channel.

use anyhow::{Context, Result};
use clap::Parser;

use event_poller::discord_client::DEFAULT_API_BASE;
use event_poller::timezone::DEFAULT_TIMEZONE;
use event_poller::{DigestRenderer, DiscordClient, DisplayZone, EventSource};

#[derive(Parser)]
#[command(name = "preview")]
#[command(about = "Render the current event digest for a guild to stdout")]
struct Cli {
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, env = "DISCORD_GUILD_ID")]
    guild_id: String,

    #[arg(long, env = "EVENTPLAN_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    #[arg(long, env = "DISCORD_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = DiscordClient::new(&cli.token, &cli.api_base)?;
    let source = EventSource::new(client);
    let events = source
        .list_events(&cli.guild_id)
        .await
        .context("Error retrieving events list")?;

    println!("{}", DigestRenderer::new(DisplayZone::load(&cli.timezone)).render(&events));
    Ok(())
}

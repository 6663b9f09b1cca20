use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::discord_client::DEFAULT_API_BASE;
use crate::timezone::DEFAULT_TIMEZONE;

/// Runtime configuration, read from flags with environment fallbacks.
///
/// A `.env` file in the working directory is loaded before parsing.
#[derive(Debug, Clone, Parser)]
#[command(name = "event-poller")]
#[command(about = "Posts a digest of a Discord guild's scheduled events and keeps it current")]
pub struct Config {
    /// Discord bot token, without the "Bot " prefix
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Guild whose scheduled events are listed
    #[arg(long, env = "DISCORD_GUILD_ID")]
    pub guild_id: String,

    /// Channel the digest message is posted to
    #[arg(long, env = "DISCORD_CHANNEL_ID")]
    pub channel_id: String,

    /// JSON file remembering the last published digest and its message id
    #[arg(long, env = "EVENTPLAN_STATE_FILE", default_value = "state.json")]
    pub state_file: PathBuf,

    /// Seconds between poll cycles
    #[arg(long, env = "EVENTPLAN_POLL_INTERVAL_SECS", default_value_t = 60)]
    pub poll_interval_secs: u64,

    /// IANA timezone used for dates and times in the digest
    #[arg(long, env = "EVENTPLAN_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Base URL of the Discord REST API
    #[arg(long, env = "DISCORD_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

impl Config {
    /// Parse from the process arguments and environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            bail!("DISCORD_TOKEN must not be empty");
        }
        if self.guild_id.trim().is_empty() {
            bail!("DISCORD_GUILD_ID must not be empty");
        }
        if self.channel_id.trim().is_empty() {
            bail!("DISCORD_CHANNEL_ID must not be empty");
        }
        if self.poll_interval_secs == 0 {
            bail!("EVENTPLAN_POLL_INTERVAL_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

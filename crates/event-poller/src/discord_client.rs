//! Discord REST client for the three calls the poller needs.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::PlatformError;
use crate::platform::{MessageRecord, Platform, ScheduledEventRecord};

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/eventplan/event-poller, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Client for interacting with the Discord REST API as a bot user.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    api_base: String,
}

impl DiscordClient {
    pub fn new(token: &str, api_base: &str) -> Result<Self, PlatformError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bot {}", token))
            .map_err(|_| PlatformError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

/// Turn a non-2xx response into `PlatformError::Status`
async fn check_status(response: Response) -> Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(PlatformError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PlatformError> {
    let bytes = check_status(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl Platform for DiscordClient {
    async fn list_scheduled_events(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ScheduledEventRecord>, PlatformError> {
        let response = self
            .http
            .get(self.url(&format!("/guilds/{}/scheduled-events", guild_id)))
            .send()
            .await?;

        let events: Vec<ScheduledEventRecord> = decode(response).await?;
        tracing::debug!("Fetched {} scheduled events for guild {}", events.len(), guild_id);
        Ok(events)
    }

    async fn send_message(
        &self,
        channel_id: &str,
        content: &str,
    ) -> Result<MessageRecord, PlatformError> {
        let response = self
            .http
            .post(self.url(&format!("/channels/{}/messages", channel_id)))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;

        let message: MessageRecord = decode(response).await?;
        tracing::info!("Sent message {} to channel {}", message.id, channel_id);
        Ok(message)
    }

    async fn delete_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<(), PlatformError> {
        let response = self
            .http
            .delete(self.url(&format!(
                "/channels/{}/messages/{}",
                channel_id, message_id
            )))
            .send()
            .await?;

        check_status(response).await?;
        tracing::info!("Deleted message {} from channel {}", message_id, channel_id);
        Ok(())
    }
}

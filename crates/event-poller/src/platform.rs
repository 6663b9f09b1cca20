//! The chat platform boundary.
//!
//! Everything the poller needs from Discord is behind [`Platform`], so the
//! adapter and publisher can be exercised against in-memory fakes.

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Scheduled event exactly as the platform sends it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEventRecord {
    pub id: String,
    pub name: String,
    pub status: u8,
    pub entity_type: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_start_time: Option<String>,
    #[serde(default)]
    pub scheduled_end_time: Option<String>,
    #[serde(default)]
    pub entity_metadata: Option<EntityMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(default)]
    pub location: Option<String>,
}

/// A message the platform created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    #[serde(default)]
    pub channel_id: Option<String>,
}

/// Outbound calls the poller makes. All of them are unary and fallible.
#[allow(async_fn_in_trait)]
pub trait Platform {
    /// All scheduled events of a guild, in API order
    async fn list_scheduled_events(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ScheduledEventRecord>, PlatformError>;

    /// Post a new message and return what was created
    async fn send_message(
        &self,
        channel_id: &str,
        content: &str,
    ) -> Result<MessageRecord, PlatformError>;

    async fn delete_message(&self, channel_id: &str, message_id: &str)
        -> Result<(), PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_discord_payload() {
        let json = r#"{
            "id": "1100",
            "guild_id": "278161377045118977",
            "name": "Spieleabend",
            "description": null,
            "scheduled_start_time": "2026-10-16T18:00:00+00:00",
            "scheduled_end_time": null,
            "privacy_level": 2,
            "status": 1,
            "entity_type": 3,
            "entity_metadata": { "location": "https://x.example/r" }
        }"#;

        let record: ScheduledEventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1100");
        assert_eq!(record.status, 1);
        assert_eq!(record.entity_type, 3);
        assert_eq!(record.description, None);
        assert_eq!(
            record.scheduled_start_time.as_deref(),
            Some("2026-10-16T18:00:00+00:00")
        );
        assert_eq!(
            record.entity_metadata.and_then(|m| m.location).as_deref(),
            Some("https://x.example/r")
        );
    }

    #[test]
    fn test_record_tolerates_missing_optionals() {
        let json = r#"{"id": "1", "name": "Voice", "status": 2, "entity_type": 2}"#;
        let record: ScheduledEventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.entity_metadata, None);
        assert_eq!(record.scheduled_start_time, None);
    }
}

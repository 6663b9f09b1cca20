//! Event source adapter: platform records in, sorted domain events out.

use chrono::{DateTime, Utc};
use eventplan_types::{Event, EventKind, EventStatus};

use crate::error::FetchError;
use crate::platform::{Platform, ScheduledEventRecord};

/// Wraps a [`Platform`] and hands out normalized, start-ordered events
pub struct EventSource<P> {
    platform: P,
}

impl<P: Platform> EventSource<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// Fetch all scheduled events of the guild, sorted ascending by start.
    ///
    /// The sort is stable, so events starting at the same instant keep the
    /// order the platform returned them in. Events without a usable start
    /// time come first.
    pub async fn list_events(&self, guild_id: &str) -> Result<Vec<Event>, FetchError> {
        if guild_id.trim().is_empty() {
            return Err(FetchError::InvalidGuildId);
        }

        let records = self.platform.list_scheduled_events(guild_id).await?;
        let total = records.len();

        let mut events: Vec<Event> = records.into_iter().filter_map(convert_event).collect();
        events.sort_by_key(|e| e.start);

        if events.len() != total {
            tracing::warn!(
                "Dropped {} of {} events with unrecognized status or type",
                total - events.len(),
                total
            );
        }

        Ok(events)
    }
}

/// Convert a platform record into an [`Event`].
///
/// Returns `None` when the status or entity type is not one we know.
pub fn convert_event(record: ScheduledEventRecord) -> Option<Event> {
    let Some(status) = EventStatus::from_wire(record.status) else {
        tracing::warn!("Event {} has unknown status {}", record.id, record.status);
        return None;
    };
    let Some(kind) = EventKind::from_wire(record.entity_type) else {
        tracing::warn!(
            "Event {} has unknown entity type {}",
            record.id,
            record.entity_type
        );
        return None;
    };

    let link = match kind {
        EventKind::External => record.entity_metadata.and_then(|m| m.location),
        _ => None,
    };

    Some(Event {
        start: parse_timestamp(record.scheduled_start_time.as_deref()),
        end: parse_timestamp(record.scheduled_end_time.as_deref()),
        id: record.id,
        name: record.name,
        status,
        kind,
        description: record.description,
        link,
    })
}

/// Parse an ISO 8601 timestamp; anything unparseable is treated as absent
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Ignoring unparseable timestamp {:?}: {}", raw, e);
            None
        }
    }
}

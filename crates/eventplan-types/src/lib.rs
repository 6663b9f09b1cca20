//! Platform-independent domain types for the event digest.
//!
//! The enums here are independent of Discord's numeric wire
//! values; `from_wire` / `to_wire` are the only place the two meet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Scheduled,
    Active,
    Completed,
    Canceled,
}

impl EventStatus {
    /// Map Discord's `GuildScheduledEventStatus` value
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(EventStatus::Scheduled),
            2 => Some(EventStatus::Active),
            3 => Some(EventStatus::Completed),
            4 => Some(EventStatus::Canceled),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            EventStatus::Scheduled => 1,
            EventStatus::Active => 2,
            EventStatus::Completed => 3,
            EventStatus::Canceled => 4,
        }
    }

    /// Whether events in this status belong in the digest
    pub fn is_visible(self) -> bool {
        matches!(self, EventStatus::Scheduled | EventStatus::Active)
    }
}

/// Where an event takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    StageInstance,
    Voice,
    External,
}

impl EventKind {
    /// Map Discord's `GuildScheduledEventEntityType` value
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(EventKind::StageInstance),
            2 => Some(EventKind::Voice),
            3 => Some(EventKind::External),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            EventKind::StageInstance => 1,
            EventKind::Voice => 2,
            EventKind::External => 3,
        }
    }
}

/// A scheduled event as seen by the digest.
///
/// `start` and `end` are `None` when the platform sent no timestamp or one
/// that could not be parsed. `None` orders before any `Some`, so such events
/// sort as earliest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub status: EventStatus,
    pub kind: EventKind,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Location URL, only ever set for `EventKind::External`
    pub link: Option<String>,
}

impl Event {
    pub fn is_upcoming(&self) -> bool {
        self.status.is_visible()
    }

    /// Description with surrounding whitespace removed, if anything is left
    pub fn trimmed_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Key under which the last published digest body is stored
pub const MESSAGE_BODY_KEY: &str = "messageBody";

/// Key under which the id of the message showing that body is stored
pub const MESSAGE_ID_KEY: &str = "messageID";

/// What the publisher last put into the channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishState {
    pub last_rendered_content: String,
    pub last_message_id: Option<String>,
}

impl PublishState {
    /// Build from the raw key-value strings, where empty means absent
    pub fn from_raw(body: String, message_id: String) -> Self {
        Self {
            last_rendered_content: body,
            last_message_id: if message_id.is_empty() {
                None
            } else {
                Some(message_id)
            },
        }
    }

    pub fn has_message(&self) -> bool {
        self.last_message_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(status: EventStatus, description: Option<&str>) -> Event {
        Event {
            id: "1".to_string(),
            name: "Standup".to_string(),
            status,
            kind: EventKind::Voice,
            description: description.map(str::to_string),
            start: None,
            end: None,
            link: None,
        }
    }

    #[test]
    fn test_status_wire_mapping() {
        assert_eq!(EventStatus::from_wire(1), Some(EventStatus::Scheduled));
        assert_eq!(EventStatus::from_wire(4), Some(EventStatus::Canceled));
        assert_eq!(EventStatus::from_wire(0), None);
        assert_eq!(EventStatus::from_wire(9), None);
        assert_eq!(EventStatus::Active.to_wire(), 2);
    }

    #[test]
    fn test_kind_wire_mapping() {
        assert_eq!(EventKind::from_wire(1), Some(EventKind::StageInstance));
        assert_eq!(EventKind::from_wire(2), Some(EventKind::Voice));
        assert_eq!(EventKind::from_wire(3), Some(EventKind::External));
        assert_eq!(EventKind::from_wire(4), None);
    }

    #[test]
    fn test_only_scheduled_and_active_are_upcoming() {
        assert!(event(EventStatus::Scheduled, None).is_upcoming());
        assert!(event(EventStatus::Active, None).is_upcoming());
        assert!(!event(EventStatus::Completed, None).is_upcoming());
        assert!(!event(EventStatus::Canceled, None).is_upcoming());
    }

    #[test]
    fn test_trimmed_description() {
        assert_eq!(
            event(EventStatus::Scheduled, Some("  bring snacks \n")).trimmed_description(),
            Some("bring snacks")
        );
        assert_eq!(
            event(EventStatus::Scheduled, Some("   ")).trimmed_description(),
            None
        );
        assert_eq!(event(EventStatus::Scheduled, None).trimmed_description(), None);
    }

    #[test]
    fn test_missing_start_orders_first() {
        let dated = Some(DateTime::<Utc>::from_timestamp(0, 0).unwrap());
        assert!(None < dated);
    }

    #[test]
    fn test_publish_state_from_raw() {
        let empty = PublishState::from_raw(String::new(), String::new());
        assert_eq!(empty, PublishState::default());
        assert!(!empty.has_message());

        let state = PublishState::from_raw("body".to_string(), "42".to_string());
        assert_eq!(state.last_message_id.as_deref(), Some("42"));
        assert!(state.has_message());
    }
}

//! Digest rendering.
//!
//! Turns an already start-ordered event list into the German Markdown digest
//! that gets posted to the channel:
//!
//! ```text
//! **Eventplan:**
//!
//! **16. Oktober:**
//! ***09:00 Uhr:*** Standup
//! ***19:30 Uhr:*** Spieleabend (=> <https://x.example/r>)
//! _Bring your own snacks_
//! ```

use chrono::{Datelike, NaiveDate};
use eventplan_types::{Event, EventKind};

use crate::timezone::DisplayZone;

pub const TITLE: &str = "**Eventplan:**";

/// Shown instead of any date or event lines when nothing is upcoming
pub const NO_EVENTS: &str = "Keine Events";

const UNDATED_HEADING: &str = "Ohne Datum";

const MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Renders event lists into digest text in a fixed display timezone
#[derive(Debug, Clone, Default)]
pub struct DigestRenderer {
    zone: DisplayZone,
}

impl DigestRenderer {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    /// Render the digest for `events`.
    ///
    /// Completed and canceled events are skipped. A date heading is written
    /// whenever the local start date differs from the previous event's, so
    /// the input must already be sorted by start.
    pub fn render(&self, events: &[Event]) -> String {
        let mut out = String::new();
        out.push_str(TITLE);
        out.push('\n');

        let mut upcoming = events.iter().filter(|e| e.is_upcoming()).peekable();
        if upcoming.peek().is_none() {
            out.push_str(NO_EVENTS);
            return out;
        }

        let mut current_date: Option<Option<NaiveDate>> = None;

        for event in upcoming {
            let local_start = event.start.map(|start| self.zone.localize(start));
            let date = local_start.map(|dt| dt.date());

            if current_date != Some(date) {
                current_date = Some(date);
                let heading = match date {
                    Some(date) => format_date(date),
                    None => UNDATED_HEADING.to_string(),
                };
                out.push_str(&format!("\n**{}:**\n", heading));
            }

            let time = local_start
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string());

            out.push_str(&format!(
                "***{} Uhr:*** {}{}\n",
                time,
                event.name,
                link_annotation(event)
            ));

            if let Some(description) = event.trimmed_description() {
                out.push_str(&format!("_{}_\n", description));
            }
        }

        out
    }
}

/// `DD. Monat`, e.g. `03. März`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}. {}", date.day(), MONTHS[date.month0() as usize])
}

fn link_annotation(event: &Event) -> String {
    match (event.kind, event.link.as_deref()) {
        (EventKind::External, Some(link)) if !link.is_empty() => format!(" (=> <{}>)", link),
        _ => String::new(),
    }
}

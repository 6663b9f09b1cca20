use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// The timezone all digest timestamps are shown in.
///
/// Resolved once at startup and passed to the renderer explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Named(Tz),
    /// Whatever the host considers local time
    Local,
}

impl DisplayZone {
    /// Resolve an IANA zone name, falling back to host local time with a warning
    pub fn load(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => {
                tracing::debug!("Using display timezone {}", tz.name());
                DisplayZone::Named(tz)
            }
            Err(e) => {
                tracing::warn!(
                    "Error loading timezone data for {:?}: {}. Falling back to local time",
                    name,
                    e
                );
                DisplayZone::Local
            }
        }
    }

    /// Wall-clock time of `instant` in this zone
    pub fn localize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Named(tz) => instant.with_timezone(tz).naive_local(),
            DisplayZone::Local => instant.with_timezone(&Local).naive_local(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DisplayZone::Named(tz) => tz.name(),
            DisplayZone::Local => "local",
        }
    }
}

impl Default for DisplayZone {
    fn default() -> Self {
        DisplayZone::Named(chrono_tz::Europe::Berlin)
    }
}

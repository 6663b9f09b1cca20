use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

use crate::error::CycleError;
use crate::events::EventSource;
use crate::platform::Platform;
use crate::publisher::{PublishOutcome, ReconcilingPublisher};
use crate::render::DigestRenderer;
use crate::state::StateStore;

/// Drives fetch → render → publish on a fixed interval.
///
/// Cycles never overlap. A slow cycle pushes the next tick back instead of
/// triggering a burst of catch-up ticks.
pub struct Scheduler<P, S> {
    source: EventSource<P>,
    renderer: DigestRenderer,
    publisher: ReconcilingPublisher<P, S>,
    guild_id: String,
    channel_id: String,
    interval: Duration,
}

impl<P: Platform, S: StateStore> Scheduler<P, S> {
    pub fn new(
        source: EventSource<P>,
        renderer: DigestRenderer,
        publisher: ReconcilingPublisher<P, S>,
        guild_id: impl Into<String>,
        channel_id: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            renderer,
            publisher,
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
            interval,
        }
    }

    /// Run one full cycle
    pub async fn run_cycle(&mut self) -> Result<PublishOutcome, CycleError> {
        let events = self.source.list_events(&self.guild_id).await?;
        let digest = self.renderer.render(&events);
        let outcome = self.publisher.publish(&self.channel_id, &digest).await?;

        match &outcome {
            PublishOutcome::Unchanged => {
                tracing::debug!("Poll cycle done ({} events, digest unchanged)", events.len())
            }
            PublishOutcome::Sent { message_id } => {
                tracing::info!("Posted digest as message {}", message_id)
            }
            PublishOutcome::Replaced {
                previous,
                message_id,
            } => tracing::info!("Replaced digest message {} with {}", previous, message_id),
        }

        Ok(outcome)
    }

    /// Tick forever; returns only when a cycle fails
    pub async fn run(&mut self) -> CycleError {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            "Event poller started (interval: {:?}, guild: {}, channel: {})",
            self.interval,
            self.guild_id,
            self.channel_id
        );

        loop {
            ticker.tick().await;
            tracing::debug!("Running poll cycle");

            if let Err(e) = self.run_cycle().await {
                return e;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, PlatformError, PublishError};
    use crate::platform::{MessageRecord, ScheduledEventRecord};
    use crate::state::MemoryStateStore;
    use crate::timezone::DisplayZone;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct ScriptedPlatform {
        events: Arc<Mutex<Vec<ScheduledEventRecord>>>,
        sends: Arc<Mutex<Vec<String>>>,
        deletes: Arc<Mutex<Vec<String>>>,
        fail_list: bool,
        fail_send: bool,
    }

    impl Platform for ScriptedPlatform {
        async fn list_scheduled_events(
            &self,
            _guild_id: &str,
        ) -> Result<Vec<ScheduledEventRecord>, PlatformError> {
            if self.fail_list {
                return Err(PlatformError::InvalidToken);
            }
            Ok(self.events.lock().unwrap().clone())
        }

        async fn send_message(
            &self,
            _channel_id: &str,
            content: &str,
        ) -> Result<MessageRecord, PlatformError> {
            if self.fail_send {
                return Err(PlatformError::Status {
                    status: reqwest::StatusCode::FORBIDDEN,
                    body: "Missing Permissions".to_string(),
                });
            }
            let mut sends = self.sends.lock().unwrap();
            sends.push(content.to_string());
            Ok(MessageRecord {
                id: format!("m{}", sends.len()),
                channel_id: None,
            })
        }

        async fn delete_message(
            &self,
            _channel_id: &str,
            message_id: &str,
        ) -> Result<(), PlatformError> {
            self.deletes.lock().unwrap().push(message_id.to_string());
            Ok(())
        }
    }

    fn scheduler(platform: &ScriptedPlatform) -> Scheduler<ScriptedPlatform, MemoryStateStore> {
        Scheduler::new(
            EventSource::new(platform.clone()),
            DigestRenderer::new(DisplayZone::Named(chrono_tz::Europe::Berlin)),
            ReconcilingPublisher::new(platform.clone(), MemoryStateStore::new()),
            "guild",
            "channel",
            Duration::from_millis(10),
        )
    }

    fn standup() -> ScheduledEventRecord {
        ScheduledEventRecord {
            id: "1".to_string(),
            name: "Standup".to_string(),
            status: 1,
            entity_type: 2,
            scheduled_start_time: Some("2026-10-16T07:00:00+00:00".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_cycles_only_republish_on_change() {
        let platform = ScriptedPlatform::default();
        let mut scheduler = scheduler(&platform);

        let first = scheduler.run_cycle().await.unwrap();
        assert!(matches!(first, PublishOutcome::Sent { .. }));
        assert_eq!(
            platform.sends.lock().unwrap().as_slice(),
            ["**Eventplan:**\nKeine Events"]
        );

        let second = scheduler.run_cycle().await.unwrap();
        assert_eq!(second, PublishOutcome::Unchanged);

        platform.events.lock().unwrap().push(standup());
        let third = scheduler.run_cycle().await.unwrap();

        assert_eq!(
            third,
            PublishOutcome::Replaced {
                previous: "m1".to_string(),
                message_id: "m2".to_string()
            }
        );
        assert_eq!(platform.deletes.lock().unwrap().as_slice(), ["m1"]);
        assert_eq!(
            platform.sends.lock().unwrap()[1],
            "**Eventplan:**\n\n**16. Oktober:**\n***09:00 Uhr:*** Standup\n"
        );
    }

    #[tokio::test]
    async fn test_run_stops_on_fetch_error() {
        let platform = ScriptedPlatform {
            fail_list: true,
            ..Default::default()
        };
        let mut scheduler = scheduler(&platform);

        let err = scheduler.run().await;
        assert!(matches!(err, CycleError::Fetch(FetchError::Platform(_))));
        assert!(platform.sends.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_on_publish_error() {
        let platform = ScriptedPlatform {
            fail_send: true,
            ..Default::default()
        };
        let mut scheduler = scheduler(&platform);

        let err = scheduler.run().await;
        assert!(matches!(err, CycleError::Publish(PublishError::Send(_))));
    }
}

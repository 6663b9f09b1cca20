//! Reconciling publisher.
//!
//! Keeps exactly one digest message in the channel. The desired content is
//! compared with what was last published *before* any network call, so
//! publishing the same text twice only ever touches the platform once.
//!
//! Known gaps:
//! - The new content is recorded before delete/send run. If either fails the
//!   state already claims the new content, and the next identical digest is
//!   treated as published.
//! - If the delete succeeds but the send fails, `last_message_id` keeps
//!   pointing at the deleted message. The next change deletes it again and
//!   fails the same way until the content changes or the state is cleared.
//! - Edits or deletions made by someone else in the channel go unnoticed.

use eventplan_types::{PublishState, MESSAGE_BODY_KEY, MESSAGE_ID_KEY};

use crate::error::PublishError;
use crate::platform::Platform;
use crate::state::StateStore;

/// What a call to [`ReconcilingPublisher::publish`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Content matched the last published digest, nothing was sent
    Unchanged,
    /// First message posted
    Sent { message_id: String },
    /// Old message deleted and a new one posted
    Replaced {
        previous: String,
        message_id: String,
    },
}

pub struct ReconcilingPublisher<P, S> {
    platform: P,
    store: S,
    state: PublishState,
}

impl<P: Platform, S: StateStore> ReconcilingPublisher<P, S> {
    /// Build a publisher, picking up whatever state `store` already holds
    pub fn new(platform: P, store: S) -> Self {
        let state = PublishState::from_raw(store.get(MESSAGE_BODY_KEY), store.get(MESSAGE_ID_KEY));

        match &state.last_message_id {
            Some(id) => tracing::info!("Resuming with digest message {}", id),
            None => tracing::info!("No digest message recorded yet"),
        }

        Self {
            platform,
            store,
            state,
        }
    }

    pub fn state(&self) -> &PublishState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Make `content` the digest shown in `channel_id`.
    ///
    /// No-op when `content` equals the last published content. Otherwise the
    /// previous message (if any) is deleted and a new one sent.
    pub async fn publish(
        &mut self,
        channel_id: &str,
        content: &str,
    ) -> Result<PublishOutcome, PublishError> {
        if content == self.state.last_rendered_content {
            tracing::debug!("Digest unchanged, skipping publish");
            return Ok(PublishOutcome::Unchanged);
        }

        self.state.last_rendered_content = content.to_string();
        self.persist(MESSAGE_BODY_KEY, content);

        let previous = self.state.last_message_id.clone();
        if let Some(old_id) = &previous {
            tracing::debug!("Deleting previous digest message {}", old_id);
            self.platform
                .delete_message(channel_id, old_id)
                .await
                .map_err(|source| PublishError::Delete {
                    message_id: old_id.clone(),
                    source,
                })?;
        }

        let message = self
            .platform
            .send_message(channel_id, content)
            .await
            .map_err(PublishError::Send)?;

        self.state.last_message_id = Some(message.id.clone());
        self.persist(MESSAGE_ID_KEY, &message.id);

        Ok(match previous {
            None => PublishOutcome::Sent {
                message_id: message.id,
            },
            Some(previous) => PublishOutcome::Replaced {
                previous,
                message_id: message.id,
            },
        })
    }

    /// Write through to the store; the in-memory state stays authoritative
    /// if the durable copy fails
    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::error!("Error writing state for {}: {}", key, e);
        }
    }
}

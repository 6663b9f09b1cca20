//! Error taxonomy for the poller.
//!
//! `FetchError` and `PublishError` are fatal for the current process and bubble
//! up to the driving loop. `StateWriteError` is logged where it happens and
//! never aborts a cycle.

use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the chat platform
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform answered with a non-success status
    #[error("Platform returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Bot token is not a valid header value")]
    InvalidToken,

    /// The response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Retrieving the guild's event list failed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Guild id must not be empty")]
    InvalidGuildId,

    #[error("Failed to list scheduled events: {0}")]
    Platform(#[from] PlatformError),
}

/// Replacing the digest message failed
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to delete message {message_id}: {source}")]
    Delete {
        message_id: String,
        #[source]
        source: PlatformError,
    },

    #[error("Failed to send message: {0}")]
    Send(#[source] PlatformError),
}

/// Writing the durable copy of the state failed
#[derive(Debug, Error)]
pub enum StateWriteError {
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write state to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that ends the polling loop
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

//! Polls a Discord guild's scheduled events and keeps a single digest
//! message in a channel up to date.

pub mod config;
pub mod discord_client;
pub mod error;
pub mod events;
pub mod platform;
pub mod publisher;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod timezone;

pub use discord_client::DiscordClient;
pub use events::EventSource;
pub use publisher::{PublishOutcome, ReconcilingPublisher};
pub use render::DigestRenderer;
pub use scheduler::Scheduler;
pub use state::{JsonFileStateStore, MemoryStateStore, StateStore};
pub use timezone::DisplayZone;

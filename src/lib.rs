//! ntfy publishing library
//!
//! Models ntfy notifications with their action buttons, renders them to the
//! server's JSON publishing format, and publishes them over HTTP.

pub mod config;
pub mod errors;
pub mod ntfy;
pub mod shared;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigManager, NtfyConfig};
pub use errors::{NtfyError, NtfyResult};
pub use ntfy::{
    format_duration, parse_duration, ActionButton, ActionKind, BroadcastAction, HttpAction,
    Message, ParseDurationError, ParsePriorityError, Priority, PublishResult, ViewAction,
};
pub use shared::clients::{BlockingPublisher, Executor, Publisher, PublisherConfig};

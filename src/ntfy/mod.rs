//! ntfy message model
//!
//! Domain types describing a notification and its action buttons. Each type
//! renders itself into a private wire record that matches the server's JSON
//! publishing schema; `to_json` encodes that record.

pub mod actions;
pub mod duration;
pub mod message;
pub mod priority;
pub mod response;
mod wire;

pub use actions::{ActionButton, ActionKind, BroadcastAction, HttpAction, ViewAction};
pub use duration::{format_duration, parse_duration, ParseDurationError};
pub use message::Message;
pub use priority::{ParsePriorityError, Priority};
pub use response::PublishResult;

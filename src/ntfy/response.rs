use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server acknowledgment of a published message
///
/// Missing fields decode to their defaults and fields not listed here are
/// ignored, so newer servers that echo more of the message still decode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishResult {
    pub id: String,      // "bUhbhgmmbeW0"
    pub time: i64,       // 1685150791
    pub expires: i64,    // 1685193991
    pub event: String,   // "message"
    pub topic: String,   // "alerts"
    pub message: String, // "triggered"
}

impl PublishResult {
    /// When the server accepted the message
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// When the server will drop the message from its cache, if it said so
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expires == 0 {
            return None;
        }
        DateTime::from_timestamp(self.expires, 0)
    }
}

// ================
// crates/common/src/lib.rs
// ================
//! Wire types shared between the roomfeed server and its clients.
//! Everything here serializes with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message, as stored in a room log and returned to pollers.
///
/// The timestamp is assigned by the log when the message is accepted,
/// never by the caller. All fields are immutable once the message exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Display name chosen by the author; `None` renders as "Anonymous"
    pub user_name: Option<String>,
    /// Message body, non-empty UTF-8
    pub text: String,
    /// Instant the log accepted the message
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Author name with the anonymous fallback applied.
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Anonymous")
    }
}

/// One poll response: every message newer than the requested watermark,
/// plus the server clock reading taken when the poll was issued.
///
/// A client must advance its watermark to `now` — not to the timestamp of
/// the last message it received — before polling again. That discipline is
/// what makes repeated polls neither skip nor double-count a message that
/// lands on the watermark boundary.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageBatch {
    /// Server clock at the moment the poll was issued
    pub now: DateTime<Utc>,
    /// Messages with `timestamp > since`, in arrival order
    pub messages: Vec<ChatMessage>,
}

/// Request body for posting a message to a room.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostMessage {
    /// Optional display name; empty or missing means anonymous
    #[serde(default)]
    pub user_name: Option<String>,
    /// Message body, must be non-empty
    pub text: String,
}

//! Events delivered by the live stream.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Numeric identifier of a platform event.
pub type EventId = u64;

/// An account that produced an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Handle used to address the account, without the leading `@`.
    pub screen_name: CompactString,
    /// Audience size of the account.
    #[serde(default)]
    pub followers_count: u64,
}

/// A structurally valid event from the stream.
///
/// Only messages carrying `created_at` are decoded into this type; see
/// [`StreamMessage::is_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub created_at: String,
    pub user: Actor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One JSON document from the stream, before validation.
///
/// Besides events the stream interleaves notices (deletions, rate limit
/// warnings, disconnect messages) that share no fields with events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StreamMessage(pub serde_json::Value);

impl StreamMessage {
    /// Field whose presence marks a message as an event.
    pub const VALIDITY_MARKER: &'static str = "created_at";

    /// Whether this message carries the event validity marker.
    pub fn is_event(&self) -> bool {
        self.0.get(Self::VALIDITY_MARKER).is_some()
    }

    /// Decode the message as an [`Event`].
    pub fn into_event(self) -> Result<Event, serde_json::Error> {
        serde_json::from_value(self.0)
    }
}

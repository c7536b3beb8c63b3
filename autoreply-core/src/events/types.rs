//! Values carried through the pipeline.

use autoreply_sdk::objects::{Event, EventId};
use compact_str::CompactString;

/// What travels over the producer → consumer channel.
///
/// `EndOfStream` is the explicit sentinel: it cannot collide with any
/// event because it is a separate variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamItem {
    Data(Event),
    EndOfStream,
}

/// A filtered event ready to be replied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Handle of the account to address.
    pub actor: CompactString,
    /// Event the reply is attached to.
    pub event_id: EventId,
}

impl Target {
    pub fn new(actor: impl Into<CompactString>, event_id: EventId) -> Self {
        Self {
            actor: actor.into(),
            event_id,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}/{}", self.actor, self.event_id)
    }
}

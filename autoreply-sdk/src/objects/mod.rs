//! Wire objects exchanged with the social platform API.

pub mod event;
pub mod reply;
pub mod stream;

pub use event::{Actor, Event, EventId, StreamMessage};
pub use reply::{PostedStatus, ReplyRequest};
pub use stream::{StreamMode, StreamRequest, UnknownStreamMode};

//! Event types and channel infrastructure for the reply pipeline.
//!
//! # Event Flow
//!
//! 1. `StreamProducer` reads the platform stream and sends `StreamItem`s
//!    over a one-way channel
//! 2. `StreamConsumer` filters each `Event` into a `Target` and pushes it
//!    onto the `RelayQueue`
//! 3. `ReplyScheduler` pops one `Target` per jittered interval and posts a
//!    reply through the `ActionSink`
//!
//! `StreamItem::EndOfStream` (or channel closure) ends the consumer side.

pub mod channels;
pub mod relay_queue;
pub mod types;

pub use channels::{DEFAULT_CHANNEL_BUFFER, StreamItemReceiver, StreamItemSender, stream_item_channel};
pub use relay_queue::{DEFAULT_QUEUE_CAPACITY, RelayQueue, SharedRelayQueue};
pub use types::{StreamItem, Target};

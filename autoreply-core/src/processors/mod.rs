//! Processors of the reply pipeline.
//!
//! - `StreamProducer`: reads the platform stream, emits `StreamItem`
//! - `StreamConsumer`: receives `StreamItem`, filters into the `RelayQueue`
//! - `ReplyScheduler`: pops `Target`s on a jittered interval, posts replies
//! - `Supervisor`: runs producer and consumer, relays shutdown

pub mod consumer;
pub mod event_filter;
pub mod producer;
pub mod reply_scheduler;
pub mod supervisor;

pub use consumer::{ConsumerExit, Ingress, StreamConsumer};
pub use event_filter::filter_event;
pub use producer::{ProducerExit, StreamProducer};
pub use reply_scheduler::{ReplyOutcome, ReplyScheduler};
pub use supervisor::{StopReason, Supervisor};

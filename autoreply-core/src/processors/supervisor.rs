//! Supervisor: owns the producer and consumer tasks.
//!
//! Both run as independent tokio tasks joined only by the stream channel.
//! The supervisor polls their liveness on a fixed interval and stops as soon
//! as either has ended or the external shutdown future resolves. Before
//! returning it broadcasts shutdown and joins both tasks, so the consumer's
//! dedup save always runs.

use crate::events::stream_item_channel;
use crate::framework::{ActionSink, EventSource};
use crate::processors::consumer::StreamConsumer;
use crate::processors::producer::StreamProducer;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// Why the supervisor stopped polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The external shutdown future resolved.
    Interrupted,
    /// The producer or the consumer finished on its own.
    ContextEnded,
}

pub struct Supervisor<S, K> {
    producer: StreamProducer<S>,
    consumer: StreamConsumer<K>,
    poll_interval: Duration,
}

impl<S, K> Supervisor<S, K>
where
    S: EventSource + 'static,
    K: ActionSink + 'static,
{
    pub fn new(
        producer: StreamProducer<S>,
        consumer: StreamConsumer<K>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            producer,
            consumer,
            poll_interval,
        }
    }

    /// Run both contexts until one ends or `shutdown` resolves.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> StopReason {
        let (tx, rx) = stream_item_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let producer = tokio::spawn(self.producer.run(tx, shutdown_rx.clone()));
        let consumer = tokio::spawn(self.consumer.run(rx, shutdown_rx));
        info!("Bot started");

        tokio::pin!(shutdown);
        let mut poll = tokio::time::interval(self.poll_interval);
        let reason = loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break StopReason::Interrupted;
                }

                _ = poll.tick() => {
                    if producer.is_finished() || consumer.is_finished() {
                        break StopReason::ContextEnded;
                    }
                }
            }
        };

        let _ = shutdown_tx.send(true);
        match producer.await {
            Ok(exit) => info!(?exit, "Producer joined"),
            Err(e) => error!(error = %e, "Producer task failed"),
        }
        match consumer.await {
            Ok(exit) => info!(?exit, "Consumer joined"),
            Err(e) => error!(error = %e, "Consumer task failed"),
        }

        info!(?reason, "Bot stops");
        reason
    }
}

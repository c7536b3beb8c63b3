//! StreamProducer processor.
//!
//! The StreamProducer is responsible for:
//! - Opening one streaming connection through an [`EventSource`]
//! - Forwarding every message carrying the validity marker as
//!   `StreamItem::Data`, unmodified
//! - Sending `StreamItem::EndOfStream` and stopping on any stream failure
//!
//! There is no reconnect: restarting after a failure is left to whatever
//! supervises the process.

use crate::events::{StreamItem, StreamItemSender};
use crate::framework::EventSource;
use crate::utils::shutdown::shutdown_requested;
use autoreply_sdk::objects::StreamRequest;
use futures_util::StreamExt;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Why the producer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerExit {
    /// The upstream closed the connection.
    StreamEnded,
    /// Opening or reading the stream failed; `EndOfStream` was sent.
    StreamFailed,
    /// The consumer dropped its end of the channel.
    ConsumerGone,
    /// Shutdown was requested.
    Shutdown,
}

pub struct StreamProducer<S> {
    source: S,
    request: StreamRequest,
}

impl<S: EventSource> StreamProducer<S> {
    pub fn new(source: S, request: StreamRequest) -> Self {
        Self { source, request }
    }

    /// Run until the stream ends, fails, or shutdown is signaled.
    pub async fn run(
        self,
        tx: StreamItemSender,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> ProducerExit {
        info!(mode = %self.request.mode, "Producer started");

        let exit = tokio::select! {
            biased;

            _ = shutdown_requested(&mut shutdown_rx) => {
                info!("Producer received shutdown signal");
                ProducerExit::Shutdown
            }

            exit = self.forward(&tx) => exit,
        };

        if exit == ProducerExit::StreamFailed && tx.send(StreamItem::EndOfStream).await.is_err() {
            debug!("Consumer already gone, EndOfStream not delivered");
        }

        info!(?exit, "Producer ended");
        exit
    }

    async fn forward(&self, tx: &StreamItemSender) -> ProducerExit {
        let mut stream = match self.source.open(&self.request).await {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "Failed to open event stream");
                return ProducerExit::StreamFailed;
            }
        };

        while let Some(message) = stream.next().await {
            let message = match message {
                Ok(message) => message,
                Err(e) => {
                    error!(error = %e, "Event stream failed");
                    return ProducerExit::StreamFailed;
                }
            };

            if !message.is_event() {
                debug!("Skipping non-event stream message");
                continue;
            }

            let event = match message.into_event() {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, "Skipping event with unexpected shape");
                    continue;
                }
            };

            if tx.send(StreamItem::Data(event)).await.is_err() {
                info!("Stream channel closed by consumer");
                return ProducerExit::ConsumerGone;
            }
        }

        info!("Event stream ended");
        ProducerExit::StreamEnded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::stream_item_channel;
    use crate::test_support::{FakeSource, event, event_message, message, stream_failure};
    use serde_json::json;

    #[tokio::test]
    async fn test_forwards_valid_events_then_sentinel_on_failure() {
        let source = FakeSource::new(vec![
            event_message(1, "alice", 1000),
            message(json!({"delete": {"status": {"id": 5}}})),
            message(json!({"created_at": "now", "id": "bogus"})),
            event_message(2, "bob", 10),
            Err(stream_failure()),
            event_message(3, "carol", 1000),
        ]);
        let (tx, mut rx) = stream_item_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let exit = StreamProducer::new(source, StreamRequest::sample())
            .run(tx, shutdown_rx)
            .await;
        assert_eq!(exit, ProducerExit::StreamFailed);

        assert_eq!(rx.recv().await, Some(StreamItem::Data(event(1, "alice", 1000))));
        assert_eq!(rx.recv().await, Some(StreamItem::Data(event(2, "bob", 10))));
        assert_eq!(rx.recv().await, Some(StreamItem::EndOfStream));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_open_failure_sends_sentinel() {
        let (tx, mut rx) = stream_item_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let exit = StreamProducer::new(FakeSource::failing(), StreamRequest::sample())
            .run(tx, shutdown_rx)
            .await;
        assert_eq!(exit, ProducerExit::StreamFailed);
        assert_eq!(rx.recv().await, Some(StreamItem::EndOfStream));
    }

    #[tokio::test]
    async fn test_clean_end_closes_channel() {
        let (tx, mut rx) = stream_item_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let exit = StreamProducer::new(
            FakeSource::new(vec![event_message(1, "alice", 1000)]),
            StreamRequest::sample(),
        )
        .run(tx, shutdown_rx)
        .await;
        assert_eq!(exit, ProducerExit::StreamEnded);
        assert!(matches!(rx.recv().await, Some(StreamItem::Data(_))));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_hanging_stream() {
        let (tx, mut rx) = stream_item_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let producer = StreamProducer::new(
            FakeSource::hanging(vec![event_message(1, "alice", 1000)]),
            StreamRequest::sample(),
        );
        let handle = tokio::spawn(producer.run(tx, shutdown_rx));

        assert!(matches!(rx.recv().await, Some(StreamItem::Data(_))));
        shutdown_tx.send(true).unwrap();

        assert_eq!(handle.await.unwrap(), ProducerExit::Shutdown);
        assert_eq!(rx.recv().await, None);
    }
}

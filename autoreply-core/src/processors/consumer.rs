//! StreamConsumer processor.
//!
//! The StreamConsumer is responsible for:
//! - Loading the dedup cache and handing it to a spawned `ReplyScheduler`
//! - Receiving `StreamItem`s from the producer
//! - Filtering events into `Target`s and pushing them onto the `RelayQueue`
//! - Stopping the scheduler, taking the cache back and saving it on exit
//!
//! The loop ends on `EndOfStream`, on channel closure, or on shutdown. All
//! three take the same save path.

use crate::entities::{DedupCache, DedupSettings};
use crate::events::{SharedRelayQueue, StreamItem, StreamItemReceiver, Target};
use crate::framework::ActionSink;
use crate::processors::event_filter::filter_event;
use crate::processors::reply_scheduler::ReplyScheduler;
use crate::utils::shutdown::shutdown_requested;
use autoreply_sdk::objects::Event;
use kanau::processor::Processor;
use std::convert::Infallible;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Why the consumer's ingestion loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerExit {
    /// The producer sent `EndOfStream`.
    EndOfStream,
    /// Every sender was dropped.
    ChannelClosed,
    /// Shutdown was requested.
    Shutdown,
}

/// Filters incoming events onto the relay queue.
pub struct Ingress {
    queue: SharedRelayQueue,
}

impl Ingress {
    pub fn new(queue: SharedRelayQueue) -> Self {
        Self { queue }
    }
}

impl Processor<Event> for Ingress {
    type Output = Option<Target>;
    type Error = Infallible;

    async fn process(&self, event: Event) -> Result<Option<Target>, Infallible> {
        let Some(target) = filter_event(&event) else {
            return Ok(None);
        };

        let evicted = self.queue.lock().await.push(target.clone());
        if let Some(evicted) = evicted {
            debug!(%evicted, "Relay queue full, dropped oldest target");
        }
        debug!(%target, "Queued target");
        Ok(Some(target))
    }
}

pub struct StreamConsumer<K> {
    queue: SharedRelayQueue,
    scheduler: ReplyScheduler<K>,
    dedup: DedupSettings,
}

impl<K: ActionSink + 'static> StreamConsumer<K> {
    pub fn new(queue: SharedRelayQueue, scheduler: ReplyScheduler<K>, dedup: DedupSettings) -> Self {
        Self {
            queue,
            scheduler,
            dedup,
        }
    }

    /// Run the ingestion loop, then persist the dedup cache.
    pub async fn run(
        self,
        mut rx: StreamItemReceiver,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> ConsumerExit {
        let Self {
            queue,
            scheduler,
            dedup,
        } = self;
        info!("Consumer started");

        let cache = DedupCache::load(&dedup).unwrap_or_else(|e| {
            error!(error = %e, "Failed to load dedup cache, starting empty");
            DedupCache::empty(&dedup.path)
        });

        let (stop_tx, stop_rx) = watch::channel(false);
        let scheduler_handle = tokio::spawn(scheduler.run(cache, queue.clone(), stop_rx));
        let ingress = Ingress::new(queue);

        let exit = loop {
            tokio::select! {
                biased;

                _ = shutdown_requested(&mut shutdown_rx) => {
                    info!("Consumer received shutdown signal");
                    break ConsumerExit::Shutdown;
                }

                item = rx.recv() => match item {
                    Some(StreamItem::Data(event)) => {
                        let _ = ingress.process(event).await;
                    }
                    Some(StreamItem::EndOfStream) => {
                        info!("Received end of stream");
                        break ConsumerExit::EndOfStream;
                    }
                    None => {
                        info!("Stream channel closed");
                        break ConsumerExit::ChannelClosed;
                    }
                },
            }
        };
        drop(rx);

        let _ = stop_tx.send(true);
        match scheduler_handle.await {
            Ok(cache) => match cache.save() {
                Ok(actors) => info!(actors, path = %cache.path().display(), "Saved dedup cache"),
                Err(e) => error!(error = %e, "Failed to save dedup cache"),
            },
            Err(e) => error!(error = %e, "Reply scheduler task failed, dedup cache lost"),
        }

        info!(?exit, "Consumer ended");
        exit
    }
}

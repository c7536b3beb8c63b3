//! Bounded FIFO between ingestion and the reply scheduler.

use super::types::Target;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Default number of targets kept waiting for a reply.
pub const DEFAULT_QUEUE_CAPACITY: usize = 50;

/// Queue handle shared by the consumer loop and the scheduler task.
pub type SharedRelayQueue = Arc<Mutex<RelayQueue>>;

/// Fixed-capacity FIFO of [`Target`]s.
///
/// Pushing onto a full queue evicts the oldest entry, so under sustained
/// load only the most recent targets survive. Neither push nor pop blocks.
#[derive(Debug, Clone)]
pub struct RelayQueue {
    items: VecDeque<Target>,
    capacity: usize,
}

impl RelayQueue {
    /// Create an empty queue. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create an empty queue wrapped for sharing across tasks.
    pub fn shared(capacity: usize) -> SharedRelayQueue {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    /// Append `target`, returning the evicted oldest entry if the queue was full.
    pub fn push(&mut self, target: Target) -> Option<Target> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(target);
        evicted
    }

    /// Remove the oldest entry, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<Target> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.items.iter()
    }
}

impl Default for RelayQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

//! Tunables for the reply pipeline.
//!
//! These are validated runtime values; reading them from disk is the bot
//! crate's job.

use crate::entities::DedupSettings;
use crate::events::DEFAULT_QUEUE_CAPACITY;
use crate::utils::reply_interval::ReplySchedule;
use std::time::Duration;

/// Everything the supervisor needs besides the platform client and files.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Capacity of the relay queue.
    pub queue_capacity: usize,
    /// Persisted dedup set location and TTL.
    pub dedup: DedupSettings,
    /// Reply timing.
    pub schedule: ReplySchedule,
    /// How often the supervisor checks whether producer and consumer are alive.
    pub poll_interval: Duration,
}

impl PipelineConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            dedup: DedupSettings::default(),
            schedule: ReplySchedule::default(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }
}

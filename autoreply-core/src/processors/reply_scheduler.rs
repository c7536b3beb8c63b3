//! ReplyScheduler processor.
//!
//! The ReplyScheduler is responsible for:
//! - Waiting an initial delay, then ticking on a jittered, drift-free schedule
//! - Popping at most one `Target` from the `RelayQueue` per tick
//! - Skipping actors already in the `DedupCache`
//! - Composing `"@actor <random corpus line>"` and posting it via the
//!   `ActionSink`, recording the actor only on confirmed success
//!
//! A popped target gets exactly one attempt; failures are logged and dropped.

use crate::entities::{DedupCache, ReplyCorpus};
use crate::events::{SharedRelayQueue, Target};
use crate::framework::ActionSink;
use crate::utils::reply_interval::ReplySchedule;
use crate::utils::shutdown::shutdown_requested;
use autoreply_sdk::objects::ReplyRequest;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, error, info, warn};

/// What happened to a popped target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Posted,
    AlreadyReplied,
    Failed,
}

pub struct ReplyScheduler<K> {
    sink: K,
    corpus: ReplyCorpus,
    schedule: ReplySchedule,
    rng: StdRng,
}

impl<K: ActionSink + 'static> ReplyScheduler<K> {
    pub fn new(sink: K, corpus: ReplyCorpus, schedule: ReplySchedule) -> Self {
        Self::with_rng(sink, corpus, schedule, StdRng::from_os_rng())
    }

    pub fn with_rng(sink: K, corpus: ReplyCorpus, schedule: ReplySchedule, rng: StdRng) -> Self {
        Self {
            sink,
            corpus,
            schedule,
            rng,
        }
    }

    /// Run until `stop_rx` fires, then hand the cache back.
    pub async fn run(
        mut self,
        mut cache: DedupCache,
        queue: SharedRelayQueue,
        mut stop_rx: watch::Receiver<bool>,
    ) -> DedupCache {
        info!(
            initial_delay = ?self.schedule.initial_delay,
            "Reply scheduler started"
        );

        tokio::select! {
            biased;
            _ = shutdown_requested(&mut stop_rx) => {
                info!("Reply scheduler stopped before first tick");
                return cache;
            }
            _ = sleep(self.schedule.initial_delay) => {}
        }

        let mut planned = Instant::now();
        loop {
            if *stop_rx.borrow() {
                break;
            }

            let target = queue.lock().await.pop();
            if let Some(target) = target {
                tokio::select! {
                    biased;
                    _ = shutdown_requested(&mut stop_rx) => {
                        warn!(%target, "Abandoning in-flight reply on shutdown");
                        break;
                    }
                    outcome = self.reply_to(&target, &mut cache) => {
                        debug!(%target, ?outcome, "Tick finished");
                    }
                }
            }

            planned = self.schedule.next_instant(planned, &mut self.rng);
            tokio::select! {
                biased;
                _ = shutdown_requested(&mut stop_rx) => break,
                _ = sleep_until(planned) => {}
            }
        }

        info!(replied = cache.len(), "Reply scheduler stopped");
        cache
    }

    /// Attempt one reply to `target`.
    pub async fn reply_to(&mut self, target: &Target, cache: &mut DedupCache) -> ReplyOutcome {
        if cache.contains(&target.actor) {
            debug!(actor = %target.actor, "Already replied to actor, skipping");
            return ReplyOutcome::AlreadyReplied;
        }

        let line = match self.corpus.choose(&mut self.rng) {
            Ok(line) => line,
            Err(e) => {
                error!(
                    corpus = %self.corpus.path().display(),
                    error = %e,
                    "Failed to pick a reply"
                );
                return ReplyOutcome::Failed;
            }
        };
        let reply = ReplyRequest::compose(&target.actor, &line, target.event_id);

        match self.sink.post_reply(&reply).await {
            Ok(_) => {
                info!(
                    actor = %target.actor,
                    event_id = target.event_id,
                    status = %reply.status,
                    "Posted reply"
                );
                cache.record(target.actor.clone());
                ReplyOutcome::Posted
            }
            Err(e) => {
                warn!(
                    actor = %target.actor,
                    event_id = target.event_id,
                    error = %e,
                    "Failed to post reply"
                );
                ReplyOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RelayQueue;
    use crate::test_support::RecordingSink;
    use std::path::Path;
    use std::time::Duration;

    fn corpus_in(dir: &Path) -> ReplyCorpus {
        let path = dir.join("status.txt");
        std::fs::write(&path, "hi\nhello\n").unwrap();
        ReplyCorpus::new(path)
    }

    fn scheduler(sink: RecordingSink, corpus: ReplyCorpus) -> ReplyScheduler<RecordingSink> {
        ReplyScheduler::with_rng(sink, corpus, ReplySchedule::default(), StdRng::seed_from_u64(9))
    }

    #[tokio::test]
    async fn test_reply_to_records_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();
        let mut scheduler = scheduler(sink.clone(), corpus_in(dir.path()));
        let mut cache = DedupCache::empty(dir.path().join("mentioned.txt"));

        let target = Target::new("alice", 42);
        assert_eq!(scheduler.reply_to(&target, &mut cache).await, ReplyOutcome::Posted);
        assert!(cache.contains("alice"));

        let posts = sink.posts();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].status == "@alice hi" || posts[0].status == "@alice hello");
        assert_eq!(posts[0].in_reply_to_status_id, 42);

        assert_eq!(
            scheduler.reply_to(&Target::new("alice", 43), &mut cache).await,
            ReplyOutcome::AlreadyReplied
        );
        assert_eq!(sink.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_post_does_not_record() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut scheduler = scheduler(sink.clone(), corpus_in(dir.path()));
        let mut cache = DedupCache::empty(dir.path().join("mentioned.txt"));

        assert_eq!(
            scheduler.reply_to(&Target::new("alice", 42), &mut cache).await,
            ReplyOutcome::Failed
        );
        assert!(!cache.contains("alice"));
        assert_eq!(sink.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_corpus_posts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();
        let mut scheduler = scheduler(sink.clone(), ReplyCorpus::new(dir.path().join("nope.txt")));
        let mut cache = DedupCache::empty(dir.path().join("mentioned.txt"));

        assert_eq!(
            scheduler.reply_to(&Target::new("alice", 42), &mut cache).await,
            ReplyOutcome::Failed
        );
        assert!(sink.posts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_reply_per_tick_and_dedup_across_ticks() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink::default();
        let queue = RelayQueue::shared(50);
        {
            let mut queue = queue.lock().await;
            queue.push(Target::new("alice", 42));
            queue.push(Target::new("alice", 43));
            queue.push(Target::new("bob", 44));
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(
            scheduler(sink.clone(), corpus_in(dir.path())).run(
                DedupCache::empty(dir.path().join("mentioned.txt")),
                queue.clone(),
                stop_rx,
            ),
        );

        // Nothing before the initial delay.
        sleep(Duration::from_secs(14)).await;
        assert!(sink.posts().is_empty());

        // First tick at 15s handles alice#42 only.
        sleep(Duration::from_secs(2)).await;
        assert_eq!(sink.posts().len(), 1);
        assert_eq!(queue.lock().await.len(), 2);

        // Second tick pops alice#43 and skips it, third replies to bob.
        sleep(Duration::from_secs(90)).await;
        let posts = sink.posts();
        assert_eq!(posts.len(), 2);
        assert!(posts[1].status.starts_with("@bob "));
        assert!(queue.lock().await.is_empty());

        stop_tx.send(true).unwrap();
        let cache = handle.await.unwrap();
        assert!(cache.contains("alice"));
        assert!(cache.contains("bob"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_post_does_not_drift_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink {
            delay: Duration::from_secs(10),
            ..Default::default()
        };
        let queue = RelayQueue::shared(50);
        {
            let mut queue = queue.lock().await;
            for (i, actor) in ["a", "b", "c"].into_iter().enumerate() {
                queue.push(Target::new(actor, i as u64));
            }
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(
            scheduler(sink.clone(), corpus_in(dir.path())).run(
                DedupCache::empty(dir.path().join("mentioned.txt")),
                queue,
                stop_rx,
            ),
        );

        sleep(Duration::from_secs(15 + 45 + 45 + 1)).await;
        stop_tx.send(true).unwrap();
        handle.await.unwrap();

        let times = sink.post_times();
        assert_eq!(times.len(), 3);
        for pair in times.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= Duration::from_secs(35), "{gap:?} too short");
            assert!(gap < Duration::from_secs(45), "{gap:?} drifted by the slow post");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_abandons_in_flight_post() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RecordingSink {
            delay: Duration::from_secs(600),
            ..Default::default()
        };
        let queue = RelayQueue::shared(50);
        queue.lock().await.push(Target::new("alice", 1));

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(
            scheduler(sink.clone(), corpus_in(dir.path())).run(
                DedupCache::empty(dir.path().join("mentioned.txt")),
                queue,
                stop_rx,
            ),
        );

        sleep(Duration::from_secs(20)).await;
        assert_eq!(sink.posts().len(), 1);
        stop_tx.send(true).unwrap();

        let cache = handle.await.unwrap();
        assert!(!cache.contains("alice"));
    }
}

use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

/// Timing of the reply scheduler: one action per jittered interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplySchedule {
    /// Wait before the first action.
    pub initial_delay: Duration,
    /// Inclusive lower bound of the gap between planned actions.
    pub min_interval: Duration,
    /// Exclusive upper bound of the gap between planned actions.
    pub max_interval: Duration,
}

impl ReplySchedule {
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(15);
    pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(35);
    pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(45);

    /// A random gap drawn from `[min_interval, max_interval)`.
    pub fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_interval >= self.max_interval {
            return self.min_interval;
        }
        let secs = rng.random_range(self.min_interval.as_secs_f64()..self.max_interval.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Returns the planned instant following `previous`.
    ///
    /// Anchored to the previous *planned* instant rather than to now, so
    /// time spent processing a tick does not push the schedule back.
    pub fn next_instant<R: Rng + ?Sized>(&self, previous: Instant, rng: &mut R) -> Instant {
        previous + self.jitter(rng)
    }
}

impl Default for ReplySchedule {
    fn default() -> Self {
        Self {
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            min_interval: Self::DEFAULT_MIN_INTERVAL,
            max_interval: Self::DEFAULT_MAX_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_jitter_within_bounds() {
        let schedule = ReplySchedule::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let gap = schedule.jitter(&mut rng);
            assert!(gap >= Duration::from_secs(35), "{gap:?} too short");
            assert!(gap < Duration::from_secs(45), "{gap:?} too long");
        }
    }

    #[test]
    fn test_next_instant_is_anchored_to_plan() {
        let schedule = ReplySchedule::default();
        let mut rng = StdRng::seed_from_u64(3);
        let start = Instant::now();

        let mut planned = start;
        for _ in 0..10 {
            let next = schedule.next_instant(planned, &mut rng);
            let gap = next - planned;
            assert!(gap >= Duration::from_secs(35) && gap < Duration::from_secs(45));
            planned = next;
        }
        assert!(planned - start >= Duration::from_secs(350));
        assert!(planned - start < Duration::from_secs(450));
    }

    #[test]
    fn test_degenerate_range() {
        let schedule = ReplySchedule {
            initial_delay: Duration::ZERO,
            min_interval: Duration::from_secs(5),
            max_interval: Duration::from_secs(5),
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(schedule.jitter(&mut rng), Duration::from_secs(5));
    }
}

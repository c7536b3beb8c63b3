//! Audience-size filter.
//!
//! Accounts with very few followers are likely throwaways and accounts with
//! very many are unlikely to be individuals, so only the band in between is
//! replied to.

use crate::events::Target;
use autoreply_sdk::objects::Event;

/// Exclusive lower bound on the follower count.
pub const MIN_FOLLOWERS: u64 = 400;
/// Exclusive upper bound on the follower count.
pub const MAX_FOLLOWERS: u64 = 3000;

/// Map an event to a reply target if its author passes the audience filter.
pub fn filter_event(event: &Event) -> Option<Target> {
    let followers = event.user.followers_count;
    (MIN_FOLLOWERS < followers && followers < MAX_FOLLOWERS)
        .then(|| Target::new(event.user.screen_name.clone(), event.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::event;

    #[test]
    fn test_accepts_inside_band() {
        assert_eq!(
            filter_event(&event(42, "alice", 1000)),
            Some(Target::new("alice", 42))
        );
        assert!(filter_event(&event(1, "a", 401)).is_some());
        assert!(filter_event(&event(1, "a", 2999)).is_some());
    }

    #[test]
    fn test_bounds_are_exclusive() {
        assert!(filter_event(&event(1, "a", 400)).is_none());
        assert!(filter_event(&event(1, "a", 3000)).is_none());
    }

    #[test]
    fn test_rejects_outside_band() {
        assert!(filter_event(&event(1, "a", 0)).is_none());
        assert!(filter_event(&event(1, "a", 10)).is_none());
        assert!(filter_event(&event(1, "a", 1_000_000)).is_none());
    }
}

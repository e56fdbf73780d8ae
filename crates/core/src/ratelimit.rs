use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

/// Per-key sliding-window admission control.
///
/// Each key owns an ordered list of request instants bounded to the
/// window; stale instants are pruned lazily on every access. A single
/// process-wide lock guards the whole map, which keeps prune-then-append
/// atomic per key. Every operation returns a definite value; there is no
/// error path.
pub struct RateLimiter<K = i64> {
    limit: usize,
    window: Duration,
    entries: Mutex<HashMap<K, Vec<Instant>>>,
}

impl<K: Eq + Hash + Clone> RateLimiter<K> {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self { limit, window, entries: Mutex::new(HashMap::new()) }
    }

    /// Admits the request and records it, or denies it if the key already
    /// spent its budget inside the current window.
    pub fn allow(&self, key: &K) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// Requests the key can still make inside the current window, floored
    /// at zero.
    pub fn remaining(&self, key: &K) -> usize {
        self.remaining_at(key, Instant::now())
    }

    /// Forgets all recorded requests for one key.
    pub fn reset(&self, key: &K) {
        self.lock().remove(key);
    }

    /// Forgets all recorded requests for every key.
    pub fn reset_all(&self) {
        self.lock().clear();
    }

    fn allow_at(&self, key: &K, now: Instant) -> bool {
        let mut entries = self.lock();
        let stamps = entries.entry(key.clone()).or_default();
        prune(stamps, now, self.window);
        if stamps.len() < self.limit {
            stamps.push(now);
            true
        } else {
            debug!(limit = self.limit, "rate limit exceeded");
            false
        }
    }

    fn remaining_at(&self, key: &K, now: Instant) -> usize {
        let mut entries = self.lock();
        let stamps = entries.entry(key.clone()).or_default();
        prune(stamps, now, self.window);
        self.limit.saturating_sub(stamps.len())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, Vec<Instant>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn prune(stamps: &mut Vec<Instant>, now: Instant, window: Duration) {
    stamps.retain(|stamp| now.duration_since(*stamp) <= window);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use super::RateLimiter;

    #[test]
    fn fresh_key_allows_exactly_the_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let key = 7_i64;
        for _ in 0..3 {
            assert!(limiter.allow(&key));
        }
        assert!(!limiter.allow(&key));
        assert!(!limiter.allow(&key));
    }

    #[test]
    fn remaining_counts_down_and_never_goes_negative() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let key = 1_i64;
        assert_eq!(limiter.remaining(&key), 2);
        assert!(limiter.allow(&key));
        assert_eq!(limiter.remaining(&key), 1);
        assert!(limiter.allow(&key));
        assert_eq!(limiter.remaining(&key), 0);
        assert!(!limiter.allow(&key));
        assert_eq!(limiter.remaining(&key), 0);
    }

    #[test]
    fn window_expiry_restores_budget() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let key = 42_i64;
        let start = Instant::now();
        assert!(limiter.allow_at(&key, start));
        assert!(limiter.allow_at(&key, start));
        assert!(!limiter.allow_at(&key, start + Duration::from_secs(30)));
        // The first two stamps fall out of the window after 60 seconds.
        assert!(limiter.allow_at(&key, start + Duration::from_secs(61)));
        assert_eq!(limiter.remaining_at(&key, start + Duration::from_secs(61)), 1);
    }

    #[test]
    fn stamp_on_the_window_edge_still_counts() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let key = 9_i64;
        let start = Instant::now();
        assert!(limiter.allow_at(&key, start));
        assert!(!limiter.allow_at(&key, start + Duration::from_secs(60)));
    }

    #[test]
    fn keys_are_throttled_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.allow(&1_i64));
        assert!(limiter.allow(&2_i64));
        assert!(!limiter.allow(&1_i64));
    }

    #[test]
    fn reset_clears_one_key_only() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.allow(&1_i64));
        assert!(limiter.allow(&2_i64));
        limiter.reset(&1_i64);
        assert!(limiter.allow(&1_i64));
        assert!(!limiter.allow(&2_i64));
    }

    #[test]
    fn reset_all_clears_every_key() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.allow(&1_i64));
        assert!(limiter.allow(&2_i64));
        limiter.reset_all();
        assert!(limiter.allow(&1_i64));
        assert!(limiter.allow(&2_i64));
    }

    #[test]
    fn concurrent_callers_never_exceed_the_limit() {
        let limiter = Arc::new(RateLimiter::new(10, Duration::from_secs(60)));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            handles.push(std::thread::spawn(move || {
                let mut admitted = 0_usize;
                for _ in 0..10 {
                    if limiter.allow(&77_i64) {
                        admitted += 1;
                    }
                }
                admitted
            }));
        }
        let total: usize = handles.into_iter().map(|handle| handle.join().expect("join")).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn string_keys_work_too() {
        let limiter: RateLimiter<String> = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.allow(&"chat-1".to_string()));
        assert!(!limiter.allow(&"chat-1".to_string()));
    }
}

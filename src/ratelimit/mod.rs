//! Sliding-window admission gate keyed by destination domain.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Counts admissions per key over a sliding window.
///
/// Buckets are never dropped once created; the number of distinct keys seen by
/// one process is expected to stay small.
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    buckets: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// `limit` admissions per key per minute.
    pub fn per_minute(limit: usize) -> Self {
        Self::new(limit, DEFAULT_WINDOW)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admits one attempt for `key` if fewer than `limit` attempts were
    /// admitted within the last window. Denied calls leave no trace.
    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock();
        let bucket = buckets.entry(key.to_ascii_lowercase()).or_default();

        while let Some(oldest) = bucket.front() {
            if now.duration_since(*oldest) >= self.window {
                bucket.pop_front();
            } else {
                break;
            }
        }

        if bucket.len() < self.limit {
            bucket.push_back(now);
            true
        } else {
            debug!(key, limit = self.limit, "rate limit reached");
            false
        }
    }

    /// Admissions currently counted for `key`, without pruning.
    pub fn in_window(&self, key: &str) -> usize {
        self.buckets
            .lock()
            .get(&key.to_ascii_lowercase())
            .map_or(0, VecDeque::len)
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .field("window", &self.window)
            .field("keys", &self.buckets.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn third_call_in_window_is_denied_until_window_passes() {
        let limiter = RateLimiter::new(2, Duration::from_millis(1_000));
        assert!(limiter.allow("example.com"));
        assert!(limiter.allow("example.com"));
        assert!(!limiter.allow("example.com"));
        assert_eq!(limiter.in_window("example.com"), 2);

        tokio::time::advance(Duration::from_millis(1_000)).await;
        assert!(limiter.allow("example.com"));
        assert_eq!(limiter.in_window("example.com"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn window_slides_per_timestamp() {
        let limiter = RateLimiter::new(2, Duration::from_millis(1_000));
        assert!(limiter.allow("a.test"));
        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(limiter.allow("a.test"));
        tokio::time::advance(Duration::from_millis(400)).await;
        // the first admission just left the window, the second has not
        assert!(limiter.allow("a.test"));
        assert!(!limiter.allow("a.test"));
    }

    #[test]
    fn keys_are_independent_and_case_insensitive() {
        let limiter = RateLimiter::per_minute(1);
        assert!(limiter.allow("Example.com"));
        assert!(!limiter.allow("example.COM"));
        assert!(limiter.allow("other.test"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_never_exceed_the_limit() {
        let limiter = std::sync::Arc::new(RateLimiter::per_minute(5));
        let handles: Vec<_> = (0..64)
            .map(|_| {
                let limiter = std::sync::Arc::clone(&limiter);
                tokio::spawn(async move { limiter.allow("example.com") })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 5);
        assert_eq!(limiter.in_window("example.com"), 5);
    }

    #[test]
    fn zero_limit_denies_everything() {
        let limiter = RateLimiter::per_minute(0);
        assert!(!limiter.allow("example.com"));
        assert_eq!(limiter.in_window("example.com"), 0);
    }
}

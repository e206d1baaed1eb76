use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;

pub const PARKS_TTL: Duration = Duration::from_secs(4 * 60 * 60);
pub const WAIT_TIMES_TTL: Duration = Duration::from_secs(5 * 60);
pub const CROWD_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

/// Per-provider response cache. Expired entries stay around so a provider
/// that is rate limited or down can still serve its last good answer.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    pub fn get_fresh(&self, key: &str) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < entry.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Any cached value regardless of age.
    pub fn get_stale(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }
}

#[derive(Debug)]
struct LimiterState {
    sent: VecDeque<Instant>,
    backoff_until: Option<Instant>,
}

/// Sliding-window limiter for calls to one upstream provider.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(LimiterState {
                sent: VecDeque::new(),
                backoff_until: None,
            }),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Reserve a slot for one request. `false` means the caller must not
    /// contact the provider right now.
    pub fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut state = self.state.lock();

        if let Some(until) = state.backoff_until {
            if now < until {
                return false;
            }
            state.backoff_until = None;
        }

        while state
            .sent
            .front()
            .is_some_and(|oldest| now.duration_since(*oldest) >= self.window)
        {
            state.sent.pop_front();
        }

        if state.sent.len() >= self.max_requests {
            return false;
        }
        state.sent.push_back(now);
        true
    }

    /// Stop all requests for `duration`, e.g. after an HTTP 429.
    pub fn back_off(&self, duration: Duration) {
        let until = Instant::now() + duration;
        let mut state = self.state.lock();
        if state.backoff_until.map_or(true, |current| current < until) {
            state.backoff_until = Some(until);
        }
    }

    pub fn is_backing_off(&self) -> bool {
        self.state
            .lock()
            .backoff_until
            .is_some_and(|until| Instant::now() < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_and_stale_reads() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.insert("a", 1, Duration::from_secs(60));
        cache.insert("b", 2, Duration::ZERO);

        assert_eq!(cache.get_fresh("a"), Some(1));
        assert_eq!(cache.get_fresh("b"), None);
        assert_eq!(cache.get_stale("b"), Some(2));
        assert_eq!(cache.get_stale("missing"), None);
    }

    #[test]
    fn limiter_caps_requests_per_window() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn limiter_window_slides() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.try_acquire());
    }

    #[test]
    fn back_off_blocks_until_expiry() {
        let limiter = RateLimiter::new(10, Duration::from_secs(60));
        limiter.back_off(Duration::from_millis(20));
        assert!(limiter.is_backing_off());
        assert!(!limiter.try_acquire());
        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.try_acquire());
    }
}

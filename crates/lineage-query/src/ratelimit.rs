//! Per-client sliding-window rate limiting.
//!
//! The limiter owns all of its state behind a single mutex: a map from client
//! key to the ordered timestamps of that client's requests inside the window.
//! Pruning happens lazily on every check; a periodic sweep drops keys whose
//! lists have emptied so idle clients do not accumulate. State is process
//! lifetime only.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after_secs: u64 },
}

/// A concurrency-safe sliding-window rate limiter.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests: max_requests as usize,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record a request for `key`.
    ///
    /// Prunes timestamps older than the window, then either rejects with the
    /// seconds until the oldest remaining timestamp leaves the window
    /// (at least 1), or records now and allows. The lock is held only for
    /// this read-modify-write; no I/O happens under it.
    pub async fn is_allowed(&self, key: &str) -> RateDecision {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();

        let stamps = windows.entry(key.to_string()).or_default();
        Self::prune(stamps, now, self.window);

        if stamps.len() >= self.max_requests {
            let retry_after_secs = stamps
                .front()
                .map(|oldest| {
                    let remaining = self.window.saturating_sub(now.duration_since(*oldest));
                    (remaining.as_secs_f64().ceil() as u64).max(1)
                })
                .unwrap_or(1);
            return RateDecision::Limited { retry_after_secs };
        }

        stamps.push_back(now);
        RateDecision::Allowed
    }

    /// Run the periodic sweep until aborted. Independent of the request
    /// path; request deadlines never cancel it.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(every);
            loop {
                ticker.tick().await;
                self.sweep().await;
            }
        })
    }

    /// One sweep pass: prune every key, drop keys left empty.
    async fn sweep(&self) {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let before = windows.len();
        windows.retain(|_, stamps| {
            Self::prune(stamps, now, self.window);
            !stamps.is_empty()
        });
        let dropped = before - windows.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = windows.len(), "Rate limiter sweep");
        }
    }

    fn prune(stamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = stamps.front() {
            if now.duration_since(*oldest) >= window {
                stamps.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn allows_burst_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new(5, WINDOW);

        for _ in 0..5 {
            assert_eq!(limiter.is_allowed("10.0.0.1").await, RateDecision::Allowed);
        }

        // Sixth call inside the same window: rejected, full window remaining
        // since all five landed at the same paused instant.
        assert_eq!(
            limiter.is_allowed("10.0.0.1").await,
            RateDecision::Limited {
                retry_after_secs: 60
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_shrinks_as_the_window_slides() {
        let limiter = RateLimiter::new(5, WINDOW);
        for _ in 0..5 {
            limiter.is_allowed("k").await;
        }

        advance(Duration::from_secs(20)).await;
        assert_eq!(
            limiter.is_allowed("k").await,
            RateDecision::Limited {
                retry_after_secs: 40
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_the_window_elapses() {
        let limiter = RateLimiter::new(5, WINDOW);
        for _ in 0..5 {
            limiter.is_allowed("k").await;
        }
        assert!(matches!(
            limiter.is_allowed("k").await,
            RateDecision::Limited { .. }
        ));

        advance(Duration::from_secs(60)).await;
        assert_eq!(limiter.is_allowed("k").await, RateDecision::Allowed);
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_independent() {
        let limiter = RateLimiter::new(1, WINDOW);
        assert_eq!(limiter.is_allowed("a").await, RateDecision::Allowed);
        assert!(matches!(
            limiter.is_allowed("a").await,
            RateDecision::Limited { .. }
        ));
        assert_eq!(limiter.is_allowed("b").await, RateDecision::Allowed);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_drops_idle_keys() {
        let limiter = RateLimiter::new(5, WINDOW);
        limiter.is_allowed("gone").await;
        limiter.is_allowed("fresh").await;

        advance(Duration::from_secs(61)).await;
        limiter.is_allowed("fresh").await;
        limiter.sweep().await;

        let windows = limiter.windows.lock().await;
        assert!(!windows.contains_key("gone"));
        assert!(windows.contains_key("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_is_at_least_one_second() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));
        limiter.is_allowed("k").await;
        advance(Duration::from_millis(999)).await;
        match limiter.is_allowed("k").await {
            RateDecision::Limited { retry_after_secs } => assert_eq!(retry_after_secs, 1),
            RateDecision::Allowed => panic!("expected limited"),
        }
    }
}

//! Per-caller token bucket rate limiting

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::RateLimitConfig;

/// Outcome of a limiter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Rejected; a token becomes available after this long
    Limited { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    updated_at: Instant,
}

/// Token buckets keyed by caller identity
///
/// Each caller gets `capacity` tokens, refilled continuously so that a full
/// bucket is restored over one `period`.
pub struct RateLimiter {
    capacity: f64,
    refill_per_sec: f64,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl RateLimiter {
    pub fn new(capacity: u32, period: Duration) -> Self {
        let capacity = f64::from(capacity.max(1));
        let period_secs = period.as_secs_f64().max(f64::EPSILON);
        Self {
            capacity,
            refill_per_sec: capacity / period_secs,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        debug!(requests = config.requests, period_secs = config.period_secs, "RateLimiter::from_config: called");
        Self::new(config.requests, config.period())
    }

    pub fn check(&self, caller: &str) -> Decision {
        self.check_at(caller, Instant::now())
    }

    /// Take one token for `caller` as of `now`
    ///
    /// Buckets that have refilled to capacity are dropped first; a fresh
    /// bucket starts full, so forgetting them changes no decision.
    pub fn check_at(&self, caller: &str, now: Instant) -> Decision {
        let mut buckets = self.buckets.lock().unwrap_or_else(|e| e.into_inner());
        buckets.retain(|_, bucket| self.refilled(bucket, now) < self.capacity);

        let bucket = buckets.entry(caller.to_string()).or_insert(Bucket {
            tokens: self.capacity,
            updated_at: now,
        });

        bucket.tokens = self.refilled(bucket, now);
        bucket.updated_at = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Decision::Allowed
        } else {
            let wait = (1.0 - bucket.tokens) / self.refill_per_sec;
            debug!(%caller, wait_secs = wait, "RateLimiter::check_at: limited");
            Decision::Limited {
                retry_after: Duration::from_secs_f64(wait),
            }
        }
    }

    /// Tokens `bucket` holds at `now`, capped at capacity
    fn refilled(&self, bucket: &Bucket, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(bucket.updated_at).as_secs_f64();
        (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity)
    }

    #[cfg(test)]
    fn tracked_callers(&self) -> usize {
        self.buckets.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

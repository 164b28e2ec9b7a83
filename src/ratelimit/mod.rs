//! Rate Limiter (spec component G): a token bucket per origin with adaptive
//! backoff on 429/503, styled after `http::retry`'s small, pure
//! backoff-calculation functions rather than the connection-pool's
//! stateful-queue pattern, since the token bucket here really is just a
//! counter plus a clock.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::CoreError;

/// Floor below which the adaptive rate never drops (spec §4.G).
const MIN_RATE: f64 = 0.1;
/// Consecutive non-429/503 responses required before the rate is nudged up.
const RECOVERY_STREAK: u32 = 64;
/// Multiplicative backoff factor applied on 429/503.
const BACKOFF_FACTOR: f64 = 0.5;
/// Multiplicative recovery factor applied after `RECOVERY_STREAK` successes.
const RECOVERY_FACTOR: f64 = 1.1;

/// A pacing ticket. Its release back to the bucket is implicit: spec §4.G
/// says "Releasing the Ticket is implicit on response receipt" — there is no
/// token to give back (token buckets are debit-only), so this type exists
/// purely so call sites have something to hold for the lifetime of the
/// in-flight request, matching the `Permit`/`Ticket` shape spec §3 describes.
pub struct Ticket {
    pub(crate) origin: String,
}

struct Bucket {
    configured_rate: f64,
    capacity: f64,
    tokens: f64,
    last_refill: Instant,
    consecutive_clean: u32,
}

impl Bucket {
    fn new(rate: f64, burst: u32) -> Self {
        Self {
            configured_rate: rate,
            capacity: burst as f64,
            tokens: burst as f64,
            last_refill: Instant::now(),
            consecutive_clean: 0,
        }
    }

    fn refill(&mut self, rate: f64) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * rate).min(self.capacity);
        self.last_refill = now;
    }
}

/// Token bucket rate limiter, one bucket per origin (`host:port`). Shared
/// across requests issued by a `Session` (and, if the `Session`'s config
/// says so, across `Session`s targeting the same origin).
pub struct RateLimiter {
    default_rate: f64,
    burst: u32,
    buckets: DashMap<String, Arc<tokio::sync::Mutex<Bucket>>>,
}

impl RateLimiter {
    pub fn new(rate_per_second: f64, burst: u32) -> Self {
        Self { default_rate: rate_per_second, burst, buckets: DashMap::new() }
    }

    fn bucket_for(&self, origin: &str) -> Arc<tokio::sync::Mutex<Bucket>> {
        self.buckets
            .entry(origin.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(Bucket::new(self.default_rate, self.burst))))
            .clone()
    }

    /// Current effective rate for `origin` (for diagnostics/tests), or the
    /// configured default if the origin has not been seen yet.
    pub async fn current_rate(&self, origin: &str) -> f64 {
        let bucket = self.bucket_for(origin);
        let guard = bucket.lock().await;
        guard.configured_rate
    }

    /// `acquire(origin, deadline) → Ticket`. Waits cooperatively (polls the
    /// bucket at short intervals rather than spinning) until a token is
    /// available or `deadline` elapses.
    pub async fn acquire(&self, origin: &str, deadline: Duration) -> Result<Ticket, CoreError> {
        let bucket = self.bucket_for(origin);
        let start = Instant::now();

        loop {
            {
                let mut guard = bucket.lock().await;
                let rate = guard.configured_rate;
                guard.refill(rate);
                if guard.tokens >= 1.0 {
                    guard.tokens -= 1.0;
                    return Ok(Ticket { origin: origin.to_string() });
                }
            }

            let remaining = deadline.checked_sub(start.elapsed());
            let Some(remaining) = remaining else {
                return Err(CoreError::DeadlineExceeded { partial: None });
            };

            // Cooperative wait rather than spinning: poll at a short
            // interval, capped so we still notice the deadline promptly.
            let wait = Duration::from_millis(10).min(remaining);
            tokio::time::sleep(wait).await;
        }
    }

    /// Called with the response status for `origin`. Applies spec §4.G's
    /// adaptive adjustment: halve (floor `MIN_RATE`) on 429/503, or grow by
    /// 10% (ceiling: configured rate) after 64 consecutive clean responses.
    /// Returns the new rate when it changed, for `RateLimitAdjusted` events.
    pub async fn observe_response(&self, origin: &str, status: http::StatusCode) -> Option<f64> {
        let bucket = self.bucket_for(origin);
        let mut guard = bucket.lock().await;

        if status.as_u16() == 429 || status.as_u16() == 503 {
            guard.consecutive_clean = 0;
            let new_rate = (guard.configured_rate * BACKOFF_FACTOR).max(MIN_RATE);
            if new_rate != guard.configured_rate {
                tracing::warn!(origin = %origin, status = status.as_u16(), old_rate = guard.configured_rate, new_rate, "backing off rate limit");
                guard.configured_rate = new_rate;
                return Some(new_rate);
            }
            return None;
        }

        guard.consecutive_clean += 1;
        if guard.consecutive_clean >= RECOVERY_STREAK {
            guard.consecutive_clean = 0;
            let ceiling = self.default_rate;
            let new_rate = (guard.configured_rate * RECOVERY_FACTOR).min(ceiling);
            if new_rate != guard.configured_rate {
                tracing::warn!(origin = %origin, old_rate = guard.configured_rate, new_rate, "recovering rate limit after clean streak");
                guard.configured_rate = new_rate;
                return Some(new_rate);
            }
        }
        None
    }
}

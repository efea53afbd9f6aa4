use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::domain::UserId;

// ============== Authorization ==============

/// An empty allowlist leaves the bot open to everyone; otherwise the sender
/// must be listed. Messages without a sender are never authorized.
pub fn is_authorized(user_id: Option<UserId>, allowed_users: &[i64]) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    allowed_users.is_empty() || allowed_users.contains(&user_id.0)
}

// ============== Rate Limiter (Token Bucket) ==============

#[derive(Clone, Debug)]
struct Bucket {
    tokens: f64,
    last_update: Instant,
}

impl Bucket {
    fn tokens_at(&self, now: Instant, refill_per_sec: f64, max: f64) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_update).as_secs_f64();
        (self.tokens + elapsed * refill_per_sec).min(max)
    }
}

/// Per-user token bucket guarding inbound messages.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    enabled: bool,
    max_tokens: f64,
    refill_per_sec: f64,
    sweep_every: Duration,
    next_sweep: Option<Instant>,
    buckets: HashMap<UserId, Bucket>,
}

impl RateLimiter {
    pub fn new(enabled: bool, max_tokens: u32, window: Duration) -> Self {
        let max_tokens = f64::from(max_tokens);
        let window_secs = window.as_secs_f64().max(1e-9);

        Self {
            enabled,
            max_tokens,
            refill_per_sec: max_tokens / window_secs,
            sweep_every: window,
            next_sweep: None,
            buckets: HashMap::new(),
        }
    }

    /// `Err(wait)` when the user is over the limit.
    pub fn check(&mut self, user_id: UserId) -> Result<(), Duration> {
        self.check_at(user_id, Instant::now())
    }

    pub fn check_at(&mut self, user_id: UserId, now: Instant) -> Result<(), Duration> {
        if !self.enabled {
            return Ok(());
        }

        self.sweep(now);

        let bucket = self.buckets.entry(user_id).or_insert_with(|| Bucket {
            tokens: self.max_tokens,
            last_update: now,
        });

        bucket.tokens = bucket.tokens_at(now, self.refill_per_sec, self.max_tokens);
        bucket.last_update = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return Ok(());
        }

        if self.refill_per_sec <= 0.0 {
            return Err(Duration::MAX);
        }
        let secs = (1.0 - bucket.tokens) / self.refill_per_sec;
        Err(Duration::from_secs_f64(secs.max(0.0)))
    }

    /// Forget users whose bucket has refilled completely; a fresh bucket is
    /// identical. Runs at most once per window.
    fn sweep(&mut self, now: Instant) {
        if self.next_sweep.is_some_and(|at| now < at) {
            return;
        }
        self.next_sweep = Some(now.checked_add(self.sweep_every).unwrap_or(now));

        let (refill, max) = (self.refill_per_sec, self.max_tokens);
        self.buckets.retain(|_, b| b.tokens_at(now, refill, max) < max);
    }
}

//! Per-minute smoothing for generative backend calls.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// GCRA throttle admitting a fixed number of requests per minute.
#[derive(Debug, Clone)]
pub struct BackendThrottle {
    limiter: Arc<DirectRateLimiter>,
    per_minute: u32,
}

impl BackendThrottle {
    /// Throttle to `rpm` requests per minute, allowing a burst of the same size.
    pub fn per_minute(rpm: NonZeroU32) -> Self {
        Self {
            limiter: Arc::new(GovernorRateLimiter::direct(Quota::per_minute(rpm))),
            per_minute: rpm.get(),
        }
    }

    /// Configured requests per minute.
    pub fn rpm(&self) -> u32 {
        self.per_minute
    }

    /// Wait until a request may be sent.
    pub async fn until_ready(&self) {
        self.limiter.until_ready().await;
    }

    /// Claim a slot without waiting. Returns false when throttled.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

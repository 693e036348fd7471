//! Fixed-window limiter for the publishing platform.

use derive_getters::Getters;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// Request count within the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RateWindow {
    /// Requests admitted since `window_start`
    request_count: u32,
    /// When the current window opened
    window_start: Instant,
}

/// Windowed request budget shared by every outbound platform call.
///
/// Cloning yields another handle onto the same window; construct a separate
/// instance for an independent budget. The counter and window start sit behind
/// a single async mutex, and a caller that has to wait keeps holding it, so two
/// callers can never both claim the last slot.
///
/// # Example
///
/// ```rust,no_run
/// use fablecast_rate_limit::RateLimiter;
/// use std::num::NonZeroU32;
///
/// # async fn demo() {
/// let limiter = RateLimiter::per_hour(NonZeroU32::new(200).unwrap());
/// let waited = limiter.acquire().await;
/// assert!(waited.is_zero());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    state: Arc<Mutex<RateWindow>>,
}

impl RateLimiter {
    /// Create a limiter admitting `limit` requests per `window`.
    pub fn new(limit: NonZeroU32, window: Duration) -> Self {
        Self {
            limit: limit.get(),
            window,
            state: Arc::new(Mutex::new(RateWindow {
                request_count: 0,
                window_start: Instant::now(),
            })),
        }
    }

    /// Create a limiter with a one-hour window.
    pub fn per_hour(limit: NonZeroU32) -> Self {
        Self::new(limit, Duration::from_secs(3600))
    }

    /// Configured requests per window.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Configured window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Claim one request slot, suspending until the window resets if the budget is spent.
    ///
    /// Returns how long the caller was suspended.
    #[instrument(skip(self), fields(limit = self.limit))]
    pub async fn acquire(&self) -> Duration {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        if now.duration_since(state.window_start) > self.window {
            debug!(previous = state.request_count, "Rate window elapsed, resetting");
            state.request_count = 0;
            state.window_start = now;
        }

        let mut waited = Duration::ZERO;
        if state.request_count >= self.limit {
            let remaining = self
                .window
                .saturating_sub(now.duration_since(state.window_start));
            if !remaining.is_zero() {
                info!(
                    wait_secs = remaining.as_secs_f64(),
                    "Rate limit reached, waiting for window reset"
                );
                tokio::time::sleep(remaining).await;
                waited = remaining;
            }
            state.request_count = 0;
            state.window_start = Instant::now();
        }

        state.request_count += 1;
        debug!(count = state.request_count, "Request slot claimed");
        waited
    }

    /// Current window state.
    pub async fn snapshot(&self) -> RateWindow {
        *self.state.lock().await
    }

    /// Slots left in the current window, treating an elapsed window as fresh.
    pub async fn remaining(&self) -> u32 {
        let state = self.state.lock().await;
        if Instant::now().duration_since(state.window_start) > self.window {
            self.limit
        } else {
            self.limit.saturating_sub(state.request_count)
        }
    }
}

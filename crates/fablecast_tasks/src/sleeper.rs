//! Timer abstraction for backoff sleeps.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current operation for a backoff delay.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Sleep for `duration` without blocking other tasks.
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer, so paused test clocks apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

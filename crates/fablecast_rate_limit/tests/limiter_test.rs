use fablecast_rate_limit::{BackendThrottle, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::Instant;

const HOUR: Duration = Duration::from_secs(3600);

fn limiter(limit: u32) -> RateLimiter {
    RateLimiter::per_hour(NonZeroU32::new(limit).unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_requests_within_budget_proceed_immediately() {
    let limiter = limiter(3);
    let start = Instant::now();

    for _ in 0..3 {
        assert_eq!(limiter.acquire().await, Duration::ZERO);
    }

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(limiter.remaining().await, 0);
    assert_eq!(*limiter.snapshot().await.request_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_request_over_budget_waits_for_window_reset() {
    let limiter = limiter(3);
    let start = Instant::now();

    for _ in 0..3 {
        limiter.acquire().await;
    }
    let waited = limiter.acquire().await;

    assert_eq!(waited, HOUR);
    assert!(start.elapsed() >= HOUR);

    let window = limiter.snapshot().await;
    assert_eq!(*window.request_count(), 1);
    assert!(*window.window_start() >= start + HOUR);
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_window_resets_count() {
    let limiter = limiter(2);
    limiter.acquire().await;
    limiter.acquire().await;

    tokio::time::advance(HOUR + Duration::from_secs(1)).await;

    assert_eq!(limiter.remaining().await, 2);
    let before = Instant::now();
    assert_eq!(limiter.acquire().await, Duration::ZERO);
    assert_eq!(before.elapsed(), Duration::ZERO);
    assert_eq!(*limiter.snapshot().await.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_never_exceed_budget() {
    let limiter = limiter(3);
    let start = Instant::now();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move {
                limiter.acquire().await;
                start.elapsed()
            })
        })
        .collect();

    let mut elapsed = Vec::new();
    for handle in handles {
        elapsed.push(handle.await.unwrap());
    }

    let immediate = elapsed.iter().filter(|d| d.is_zero()).count();
    let delayed = elapsed.iter().filter(|d| **d >= HOUR).count();
    assert_eq!(immediate, 3);
    assert_eq!(delayed, 2);
}

#[tokio::test(start_paused = true)]
async fn test_clones_share_one_window() {
    let first = limiter(2);
    let second = first.clone();
    let independent = limiter(2);

    first.acquire().await;
    second.acquire().await;

    assert_eq!(first.remaining().await, 0);
    assert_eq!(independent.remaining().await, 2);
}

#[tokio::test]
async fn test_backend_throttle_allows_initial_burst() {
    let throttle = BackendThrottle::per_minute(NonZeroU32::new(2).unwrap());
    assert_eq!(throttle.rpm(), 2);
    assert!(throttle.try_acquire());
    assert!(throttle.try_acquire());
    assert!(!throttle.try_acquire());
}

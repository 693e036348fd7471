//! Request budgeting.
//!
//! Two limiters with different shapes:
//! - [`RateLimiter`] guards the publishing platform with a fixed rolling window
//!   (N requests per hour). A caller that hits the ceiling is suspended until
//!   the window resets; exceeding the budget is never an error.
//! - [`BackendThrottle`] smooths generative-backend calls to a per-minute rate
//!   using governor's GCRA.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod limiter;
mod throttle;

pub use limiter::{RateLimiter, RateWindow};
pub use throttle::BackendThrottle;

//! Scheduling, engagement estimation and publishing.
//!
//! - [`Scheduler`] spreads a batch of pieces across posting slots.
//! - [`EngagementEstimator`] scores a piece with an advisory reach/engagement prediction.
//! - [`PublishingClient`] drives the Instagram Graph two-phase media protocol,
//!   gating every request on an injected
//!   [`RateLimiter`](fablecast_rate_limit::RateLimiter).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dto;
mod estimator;
mod publisher;
mod scheduler;

pub use dto::{ConnectionStatus, MediaItem, MediaListing, PendingMedia};
pub use estimator::{ENGAGING_MOTIFS, EngagementEstimator, HIGH_PERFORMING_CONCEPTS};
pub use publisher::{
    ACCOUNT_METRICS, DEFAULT_API_VERSION, DEFAULT_GRAPH_URL, POST_METRICS, PlatformConfig,
    PublishingClient, post_url,
};
pub use scheduler::{DEFAULT_JITTER_MINUTES, SLOTS_PER_DAY, Scheduler};

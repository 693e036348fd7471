//! Fablecast - themed parenting content for Instagram.
//!
//! Fablecast generates daily themed content pieces (carousels, reels and
//! stories) through an LLM backend, falls back to deterministic templates when
//! generation fails, schedules them into posting slots with engagement
//! estimates, and publishes them through the Instagram Graph API under an
//! hourly rate limit and bounded retry.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fablecast::{ContentService, FablecastConfig, ObservabilityConfig, init_observability};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FablecastConfig::load()?;
//!     init_observability(ObservabilityConfig::from(config.logging()))?;
//!
//!     let service = ContentService::from_config(&config)?;
//!     let week = service.generate_weekly().await;
//!     println!("{}", serde_json::to_string_pretty(&week)?);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `fablecast_error` - Error types
//! - `fablecast_core` - Themes, content pieces, scheduled posts
//! - `fablecast_rate_limit` - Hourly window limiter and backend throttle
//! - `fablecast_models` - Generative backend trait and OpenAI-compatible client
//! - `fablecast_content` - Prompting, parsing, fallback and batches
//! - `fablecast_social` - Scheduling, estimation and publishing
//! - `fablecast_tasks` - Retry state machine, cancellation, worker pool
//!
//! This crate re-exports the pieces callers need and adds configuration,
//! logging bootstrap and [`ContentService`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;
mod outcome;
mod service;

pub use config::{
    FablecastConfig, GenerationConfig, LoggingConfig, PlatformSettings, RetryConfig,
    ScheduleConfig,
};
pub use observability::{ObservabilityConfig, init_observability};
pub use outcome::{FailureReason, FailureStage, Outcome};
pub use service::ContentService;

pub use fablecast_content::{ContentGenerator, DailyContent};
pub use fablecast_core::{
    ContentKind, ContentPiece, EngagementEstimate, PostStatus, PublishedPost, ScheduledPost, Theme,
};
pub use fablecast_error::{FablecastError, FablecastErrorKind, FablecastResult};
pub use fablecast_models::{GenerativeBackend, OpenAiClient};
pub use fablecast_social::{ConnectionStatus, PendingMedia, PlatformConfig, PublishingClient};
pub use fablecast_tasks::{CancellationToken, OperationClass, RetryOrchestrator, TaskPool};

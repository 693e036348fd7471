//! Error types for Fablecast.
//!
//! Every failure in the workspace is expressed through the same pattern:
//! - a `*ErrorKind` enum naming the specific condition
//! - a `*Error` struct wrapping the kind together with the source location
//!   captured by `#[track_caller]`
//!
//! All of them convert into [`FablecastError`], so `?` works across crates.
//!
//! # Examples
//!
//! ```
//! use fablecast_error::{ConfigError, FablecastResult};
//!
//! fn account_id() -> FablecastResult<String> {
//!     Err(ConfigError::new("INSTAGRAM_BUSINESS_ACCOUNT_ID not set"))?
//! }
//!
//! assert!(account_id().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod publish;
mod task;

pub use config::ConfigError;
pub use error::{FablecastError, FablecastErrorKind, FablecastResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use publish::{PublishError, PublishErrorKind, PublishResult, PublishStage};
pub use task::{TaskError, TaskErrorKind, TaskResult};

//! Retry orchestration.
//!
//! Each retried operation walks an explicit state machine:
//!
//! ```text
//! Pending -> Running -> Success
//!              |  ^
//!              v  |
//!            Retrying -> Running ... -> Failed
//! ```
//!
//! Backoff delays depend on the [`OperationClass`] and double with every
//! failure. Sleeping goes through a [`Sleeper`] so tests can substitute a fake
//! clock, and a [`CancellationToken`](tokio_util::sync::CancellationToken) is
//! honored both during backoff and before each attempt. [`TaskPool`] bounds how
//! many operations may be in their retry lifetime at once.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod class;
mod orchestrator;
mod pool;
mod sleeper;
mod state;

pub use class::OperationClass;
pub use orchestrator::{DEFAULT_MAX_ATTEMPTS, RetryOrchestrator};
pub use pool::TaskPool;
pub use sleeper::{Sleeper, TokioSleeper};
pub use state::{RetryState, TaskState};
pub use tokio_util::sync::CancellationToken;

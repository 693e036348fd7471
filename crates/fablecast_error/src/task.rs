//! Terminal outcomes of retried operations.

use crate::FablecastError;

/// Result alias for retried operations.
pub type TaskResult<T> = Result<T, TaskError>;

/// Why a retried operation stopped without succeeding.
#[derive(Debug, derive_more::Display)]
pub enum TaskErrorKind {
    /// Every permitted attempt failed
    #[display("{} failed after {} attempts: {}", operation, attempts, last_error)]
    RetryExhausted {
        /// Operation name
        operation: String,
        /// Attempts made
        attempts: u32,
        /// Error returned by the final attempt
        last_error: FablecastError,
    },
    /// An external cancellation signal stopped the operation
    #[display("{} cancelled after {} attempts", operation, attempts)]
    Cancelled {
        /// Operation name
        operation: String,
        /// Attempts made before cancellation
        attempts: u32,
    },
    /// The worker pool refused the operation
    #[display("Worker pool unavailable: {}", _0)]
    PoolClosed(String),
}

/// Task error with the location where it was raised.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Task Error: {} at line {} in {}", kind, line, file)]
pub struct TaskError {
    /// What went wrong
    pub kind: TaskErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl TaskError {
    /// Create a new error at the caller's location.
    #[track_caller]
    pub fn new(kind: TaskErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TaskErrorKind {
        &self.kind
    }

    /// Whether the operation was stopped by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, TaskErrorKind::Cancelled { .. })
    }

    /// The error of the final attempt, when attempts were exhausted.
    pub fn last_error(&self) -> Option<&FablecastError> {
        match &self.kind {
            TaskErrorKind::RetryExhausted { last_error, .. } => Some(last_error),
            _ => None,
        }
    }
}

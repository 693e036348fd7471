//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, PublishError, TaskError};

/// Every failure category in the workspace.
///
/// # Examples
///
/// ```
/// use fablecast_error::{FablecastError, TaskError, TaskErrorKind};
///
/// let err: FablecastError = TaskError::new(TaskErrorKind::PoolClosed("publish_story".into())).into();
/// assert!(err.to_string().contains("publish_story"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FablecastErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Generative backend error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Publishing platform error
    #[from(PublishError)]
    Publish(PublishError),
    /// Retried operation error
    #[from(TaskError)]
    Task(TaskError),
}

/// Fablecast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fablecast_error::{ConfigError, FablecastErrorKind, FablecastResult};
///
/// fn load() -> FablecastResult<()> {
///     Err(ConfigError::new("missing account id"))?
/// }
///
/// let err = load().unwrap_err();
/// assert!(matches!(err.kind(), FablecastErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fablecast Error: {}", _0)]
pub struct FablecastError(Box<FablecastErrorKind>);

impl FablecastError {
    /// Create a new error from a kind.
    pub fn new(kind: FablecastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FablecastErrorKind {
        &self.0
    }
}

impl<T> From<T> for FablecastError
where
    T: Into<FablecastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fablecast operations.
pub type FablecastResult<T> = std::result::Result<T, FablecastError>;

//! Success-or-failure results handed to callers.

use fablecast_error::{
    FablecastError, FablecastErrorKind, PublishErrorKind, PublishStage, TaskErrorKind,
};
use serde::{Deserialize, Serialize};

/// Stage an operation failed at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureStage {
    /// Arguments could not be interpreted
    InvalidInput,
    /// Content generation
    Generation,
    /// Creating a media container
    MediaCreation,
    /// Publishing created media
    MediaPublish,
    /// Reading insights
    Insights,
    /// Listing account media
    MediaListing,
    /// Reading the account profile
    Connection,
    /// Stopped by cancellation before finishing
    Cancelled,
    /// Configuration or anything else outside the protocol stages
    Internal,
}

impl From<PublishStage> for FailureStage {
    fn from(stage: PublishStage) -> Self {
        match stage {
            PublishStage::MediaCreation => FailureStage::MediaCreation,
            PublishStage::MediaPublish => FailureStage::MediaPublish,
            PublishStage::Insights => FailureStage::Insights,
            PublishStage::MediaListing => FailureStage::MediaListing,
            PublishStage::Connection => FailureStage::Connection,
        }
    }
}

/// Which stage failed, and the last error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReason {
    /// Failing stage
    pub stage: FailureStage,
    /// Human-readable description of the last error
    pub error: String,
}

impl FailureReason {
    /// Build a reason from parts.
    pub fn new(stage: FailureStage, error: impl Into<String>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }
}

impl From<&FablecastError> for FailureReason {
    fn from(err: &FablecastError) -> Self {
        match err.kind() {
            FablecastErrorKind::Publish(e) => match &e.kind {
                PublishErrorKind::InvalidRequest(_) => {
                    Self::new(FailureStage::InvalidInput, e.kind.to_string())
                }
                kind => Self::new(kind.stage().into(), kind.to_string()),
            },
            FablecastErrorKind::Generation(e) => {
                Self::new(FailureStage::Generation, e.kind.to_string())
            }
            FablecastErrorKind::Task(e) => match e.kind() {
                TaskErrorKind::RetryExhausted { last_error, .. } => Self::from(last_error),
                TaskErrorKind::Cancelled { .. } => {
                    Self::new(FailureStage::Cancelled, e.kind().to_string())
                }
                TaskErrorKind::PoolClosed(_) => {
                    Self::new(FailureStage::Internal, e.kind().to_string())
                }
            },
            FablecastErrorKind::Config(e) => Self::new(FailureStage::Internal, e.message.clone()),
        }
    }
}

/// Result of an exposed operation; nothing is thrown past this boundary.
///
/// Serializes as `{"status": "success", "data": ...}` or
/// `{"status": "failure", "data": {"stage": ..., "error": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// Operation succeeded
    Success(T),
    /// Operation failed terminally
    Failure(FailureReason),
}

impl<T> Outcome<T> {
    /// Failure outcome.
    pub fn failure(stage: FailureStage, error: impl Into<String>) -> Self {
        Outcome::Failure(FailureReason::new(stage, error))
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The success payload, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The failure reason, if any.
    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(reason) => Some(reason),
        }
    }

    /// Convert into a standard result.
    pub fn into_result(self) -> Result<T, FailureReason> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(reason) => Err(reason),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<FablecastError>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::Failure(FailureReason::from(&e.into())),
        }
    }
}

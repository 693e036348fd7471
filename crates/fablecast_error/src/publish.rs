//! Publishing platform failures.

/// Result alias for platform calls.
pub type PublishResult<T> = Result<T, PublishError>;

/// Stage of the platform protocol at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishStage {
    /// `POST /{account}/media`
    #[display("media_creation")]
    MediaCreation,
    /// `POST /{account}/media_publish`
    #[display("media_publish")]
    MediaPublish,
    /// `GET /{id}/insights`
    #[display("insights")]
    Insights,
    /// `GET /{account}/media`
    #[display("media_listing")]
    MediaListing,
    /// `GET /{account}`
    #[display("connection")]
    Connection,
}

/// Specific publishing failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Creating the media container for one asset failed
    #[display("Media creation failed for item {}: HTTP {}: {}", index, status, message)]
    MediaCreation {
        /// Zero-based position of the asset in the request
        index: usize,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// The publish call was rejected
    #[display("Publishing failed: HTTP {}: {}", status, message)]
    MediaPublish {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// A read-only platform endpoint was rejected
    #[display("{} request failed: HTTP {}: {}", stage, status, message)]
    Rejected {
        /// Which endpoint
        stage: PublishStage,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// The request never produced a response
    #[display("{} request could not be sent: {}", stage, message)]
    Transport {
        /// Which endpoint
        stage: PublishStage,
        /// Transport error message
        message: String,
    },
    /// The platform answered 2xx but the body was unusable
    #[display("{} response could not be parsed: {}", stage, message)]
    Parse {
        /// Which endpoint
        stage: PublishStage,
        /// Parser message
        message: String,
    },
    /// Request was structurally invalid before anything was sent
    #[display("Invalid publish request: {}", _0)]
    InvalidRequest(String),
}

impl PublishErrorKind {
    /// The protocol stage this failure belongs to.
    pub fn stage(&self) -> PublishStage {
        match self {
            PublishErrorKind::MediaCreation { .. } | PublishErrorKind::InvalidRequest(_) => {
                PublishStage::MediaCreation
            }
            PublishErrorKind::MediaPublish { .. } => PublishStage::MediaPublish,
            PublishErrorKind::Rejected { stage, .. }
            | PublishErrorKind::Transport { stage, .. }
            | PublishErrorKind::Parse { stage, .. } => *stage,
        }
    }
}

/// Publishing error with the location where it was raised.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// What went wrong
    pub kind: PublishErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl PublishError {
    /// Create a new error at the caller's location.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PublishErrorKind {
        &self.kind
    }

    /// The protocol stage that failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fablecast_error::{PublishError, PublishErrorKind, PublishStage};
    ///
    /// let err = PublishError::new(PublishErrorKind::MediaCreation {
    ///     index: 2,
    ///     status: 400,
    ///     message: "bad image".to_string(),
    /// });
    /// assert_eq!(err.stage(), PublishStage::MediaCreation);
    /// assert_eq!(err.stage().to_string(), "media_creation");
    /// ```
    pub fn stage(&self) -> PublishStage {
        self.kind.stage()
    }
}

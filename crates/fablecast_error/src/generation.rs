//! Generative backend failures.
//!
//! Any of these is treated uniformly by the content generator: the piece being
//! built is replaced by its deterministic fallback.

/// Result alias for generative backend calls.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Specific generation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The request never produced a response
    #[display("Backend request failed: {}", _0)]
    Http(String),
    /// Backend answered with a non-success status
    #[display("Backend returned HTTP {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Backend answered without any completion text
    #[display("Backend returned an empty completion")]
    EmptyResponse,
    /// No JSON value could be located in the completion text
    #[display("No JSON found in completion: {}", _0)]
    NoJson(String),
    /// JSON was found but did not match the requested shape
    #[display("Failed to parse completion: {}", _0)]
    Parse(String),
    /// Parsed payload violates a content invariant
    #[display("Invalid content: {}", _0)]
    InvalidContent(String),
}

impl GenerationErrorKind {
    /// Whether an immediate re-request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationErrorKind::Http(_) => true,
            GenerationErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Generation error with the location where it was raised.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// What went wrong
    pub kind: GenerationErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use fablecast_error::{GenerationError, GenerationErrorKind};
    ///
    /// let err = GenerationError::new(GenerationErrorKind::Api {
    ///     status: 503,
    ///     message: "overloaded".to_string(),
    /// });
    /// assert!(err.kind.is_transient());
    /// ```
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}

//! Bounded retry with class-specific exponential backoff.

use crate::{OperationClass, RetryState, Sleeper, TaskState, TokioSleeper};
use fablecast_error::{FablecastError, TaskError, TaskErrorKind, TaskResult};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Attempts made before an operation is declared failed.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Runs fallible operations under the retry state machine.
///
/// After attempt `n` fails (and `n` is below the attempt limit) the
/// orchestrator waits `class.delay(n - 1)` and tries again. The final error is
/// reported as [`TaskErrorKind::RetryExhausted`] carrying the last attempt's
/// error. Cancellation is checked before every attempt and interrupts any
/// backoff in progress.
///
/// # Examples
///
/// ```rust,no_run
/// use fablecast_error::{GenerationError, GenerationErrorKind};
/// use fablecast_tasks::{CancellationToken, OperationClass, RetryOrchestrator};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let orchestrator = RetryOrchestrator::new();
/// let token = CancellationToken::new();
/// let value = orchestrator
///     .execute("generate", OperationClass::ContentGeneration, &token, |attempt| async move {
///         if attempt < 2 {
///             Err(GenerationError::new(GenerationErrorKind::EmptyResponse))
///         } else {
///             Ok(attempt)
///         }
///     })
///     .await?;
/// assert_eq!(value, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RetryOrchestrator<S = TokioSleeper> {
    max_attempts: u32,
    sleeper: S,
}

impl RetryOrchestrator<TokioSleeper> {
    /// Three attempts, sleeping on the tokio timer.
    pub fn new() -> Self {
        Self::with_sleeper(TokioSleeper)
    }
}

impl Default for RetryOrchestrator<TokioSleeper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sleeper> RetryOrchestrator<S> {
    /// Three attempts, sleeping through `sleeper`.
    pub fn with_sleeper(sleeper: S) -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            sleeper,
        }
    }

    /// Override the attempt limit. Values below one are raised to one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Attempt limit.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sleeper used for backoff.
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Run `operation` until it succeeds, attempts run out, or `token` fires.
    ///
    /// `operation` receives the 1-based attempt number.
    pub async fn execute<T, E, F, Fut>(
        &self,
        name: &str,
        class: OperationClass,
        token: &CancellationToken,
        operation: F,
    ) -> TaskResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<FablecastError>,
    {
        self.execute_observed(name, class, token, operation, |_| {})
            .await
    }

    /// Like [`execute`](Self::execute), reporting every state transition to
    /// `observer`, starting with [`TaskState::Pending`] and ending with a
    /// terminal state.
    #[instrument(skip_all, fields(operation = %name, class = %class))]
    pub async fn execute_observed<T, E, F, Fut, O>(
        &self,
        name: &str,
        class: OperationClass,
        token: &CancellationToken,
        mut operation: F,
        mut observer: O,
    ) -> TaskResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<FablecastError>,
        O: FnMut(&TaskState),
    {
        let mut state = RetryState::default();
        observer(&TaskState::Pending);

        loop {
            if token.is_cancelled() {
                return Err(self.cancelled(name, &state, &mut observer));
            }

            let attempt = state.begin_attempt();
            observer(&TaskState::Running { attempt });
            debug!(attempt, "Starting attempt");

            let error: FablecastError = match operation(attempt).await {
                Ok(value) => {
                    observer(&TaskState::Success { attempts: attempt });
                    if attempt > 1 {
                        info!(attempts = attempt, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) => e.into(),
            };

            if attempt >= self.max_attempts {
                observer(&TaskState::Failed { attempts: attempt });
                warn!(attempts = attempt, error = %error, "Retries exhausted");
                return Err(TaskError::new(TaskErrorKind::RetryExhausted {
                    operation: name.to_string(),
                    attempts: attempt,
                    last_error: error,
                }));
            }

            let delay = class.delay(attempt - 1);
            state.add_delay(delay);
            observer(&TaskState::Retrying { attempt, delay });
            warn!(
                attempt,
                delay_secs = delay.as_secs(),
                error = %error,
                "Attempt failed, backing off"
            );

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Err(self.cancelled(name, &state, &mut observer));
                }
                _ = self.sleeper.sleep(delay) => {}
            }
        }
    }

    fn cancelled<O: FnMut(&TaskState)>(
        &self,
        name: &str,
        state: &RetryState,
        observer: &mut O,
    ) -> TaskError {
        let attempts = *state.attempts();
        observer(&TaskState::Cancelled { attempts });
        info!(attempts, "Operation cancelled");
        TaskError::new(TaskErrorKind::Cancelled {
            operation: name.to_string(),
            attempts,
        })
    }
}

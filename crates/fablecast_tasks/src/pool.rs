//! Bounded worker pool for retried operations.

use crate::{OperationClass, RetryOrchestrator, Sleeper, TokioSleeper};
use fablecast_error::{FablecastError, TaskError, TaskErrorKind, TaskResult};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Caps how many operations may be inside their retry lifetime at once.
///
/// A worker slot is held from the first attempt through every backoff until
/// the operation reaches a terminal state. Cloning shares the slots and the
/// cancellation token.
#[derive(Debug)]
pub struct TaskPool<S = TokioSleeper> {
    orchestrator: Arc<RetryOrchestrator<S>>,
    workers: Arc<Semaphore>,
    capacity: usize,
    token: CancellationToken,
}

impl<S> Clone for TaskPool<S> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            workers: Arc::clone(&self.workers),
            capacity: self.capacity,
            token: self.token.clone(),
        }
    }
}

impl<S: Sleeper + 'static> TaskPool<S> {
    /// Create a pool with `workers` slots (at least one).
    pub fn new(workers: usize, orchestrator: RetryOrchestrator<S>) -> Self {
        let capacity = workers.max(1);
        Self {
            orchestrator: Arc::new(orchestrator),
            workers: Arc::new(Semaphore::new(capacity)),
            capacity,
            token: CancellationToken::new(),
        }
    }

    /// Total slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots not currently held.
    pub fn available(&self) -> usize {
        self.workers.available_permits()
    }

    /// Token cancelling every operation run through this pool.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Shared orchestrator.
    pub fn orchestrator(&self) -> &RetryOrchestrator<S> {
        &self.orchestrator
    }

    /// Wait for a slot, then run `operation` under the retry orchestrator.
    pub async fn run<T, E, F, Fut>(
        &self,
        name: &str,
        class: OperationClass,
        operation: F,
    ) -> TaskResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<FablecastError>,
    {
        let _permit = self
            .workers
            .acquire()
            .await
            .map_err(|e| TaskError::new(TaskErrorKind::PoolClosed(e.to_string())))?;
        debug!(operation = %name, available = self.available(), "Worker slot acquired");
        self.orchestrator
            .execute(name, class, &self.token, operation)
            .await
    }

    /// Spawn `operation` onto the runtime, holding a slot for its lifetime.
    pub fn spawn<T, E, F, Fut>(
        &self,
        name: impl Into<String>,
        class: OperationClass,
        operation: F,
    ) -> JoinHandle<TaskResult<T>>
    where
        T: Send + 'static,
        E: Into<FablecastError> + Send + 'static,
        F: FnMut(u32) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let pool = self.clone();
        let name = name.into();
        tokio::spawn(async move {
            let permit = pool
                .workers
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| TaskError::new(TaskErrorKind::PoolClosed(e.to_string())))?;
            let result = pool
                .orchestrator
                .execute(&name, class, &pool.token, operation)
                .await;
            drop(permit);
            result
        })
    }

    /// Cancel running operations and refuse new ones.
    pub fn shutdown(&self) {
        self.token.cancel();
        self.workers.close();
    }
}

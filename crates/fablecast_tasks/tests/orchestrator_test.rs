use async_trait::async_trait;
use fablecast_error::{
    FablecastErrorKind, GenerationError, GenerationErrorKind, PublishError, PublishErrorKind,
    TaskErrorKind,
};
use fablecast_tasks::{
    CancellationToken, OperationClass, RetryOrchestrator, Sleeper, TaskPool, TaskState,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records requested delays and returns immediately.
#[derive(Debug, Default)]
struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Cancels the token as soon as backoff starts, then never wakes.
#[derive(Debug)]
struct CancellingSleeper {
    token: CancellationToken,
}

#[async_trait]
impl Sleeper for CancellingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.token.cancel();
        std::future::pending::<()>().await;
    }
}

fn api_error(attempt: u32) -> GenerationError {
    GenerationError::new(GenerationErrorKind::Api {
        status: 500 + attempt as u16,
        message: format!("attempt {attempt}"),
    })
}

#[tokio::test]
async fn test_always_failing_walks_full_state_machine() {
    let orchestrator = RetryOrchestrator::with_sleeper(RecordingSleeper::default());
    let token = CancellationToken::new();
    let mut states = Vec::new();

    let result: Result<(), _> = orchestrator
        .execute_observed(
            "generate",
            OperationClass::ContentGeneration,
            &token,
            |attempt| async move { Err::<(), _>(api_error(attempt)) },
            |state| states.push(*state),
        )
        .await;

    assert_eq!(
        states,
        vec![
            TaskState::Pending,
            TaskState::Running { attempt: 1 },
            TaskState::Retrying {
                attempt: 1,
                delay: Duration::from_secs(60)
            },
            TaskState::Running { attempt: 2 },
            TaskState::Retrying {
                attempt: 2,
                delay: Duration::from_secs(120)
            },
            TaskState::Running { attempt: 3 },
            TaskState::Failed { attempts: 3 },
        ]
    );
    assert!(states.last().unwrap().is_terminal());

    let err = result.unwrap_err();
    match err.kind() {
        TaskErrorKind::RetryExhausted {
            operation,
            attempts,
            last_error,
        } => {
            assert_eq!(operation, "generate");
            assert_eq!(*attempts, 3);
            match last_error.kind() {
                FablecastErrorKind::Generation(e) => assert_eq!(e.kind, api_error(3).kind),
                other => panic!("unexpected last error: {other}"),
            }
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        orchestrator.sleeper().delays(),
        vec![Duration::from_secs(60), Duration::from_secs(120)]
    );
}

#[tokio::test]
async fn test_backoff_scales_with_operation_class() {
    let orchestrator = RetryOrchestrator::with_sleeper(RecordingSleeper::default());
    let token = CancellationToken::new();

    let _ = orchestrator
        .execute("campaign", OperationClass::Campaign, &token, |attempt| async move {
            Err::<(), _>(api_error(attempt))
        })
        .await;

    assert_eq!(
        orchestrator.sleeper().delays(),
        vec![Duration::from_secs(600), Duration::from_secs(1200)]
    );
}

#[tokio::test]
async fn test_success_on_second_attempt() {
    let orchestrator = RetryOrchestrator::with_sleeper(RecordingSleeper::default());
    let token = CancellationToken::new();
    let calls = AtomicU32::new(0);

    let value = orchestrator
        .execute("publish", OperationClass::Publish, &token, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 1 {
                    Err(PublishError::new(PublishErrorKind::InvalidRequest(
                        "flaky".to_string(),
                    )))
                } else {
                    Ok("post-1")
                }
            }
        })
        .await
        .unwrap();

    assert_eq!(value, "post-1");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        orchestrator.sleeper().delays(),
        vec![Duration::from_secs(300)]
    );
}

#[tokio::test]
async fn test_cancel_during_backoff_stops_further_attempts() {
    let token = CancellationToken::new();
    let orchestrator = RetryOrchestrator::with_sleeper(CancellingSleeper {
        token: token.clone(),
    });
    let calls = AtomicU32::new(0);
    let mut states = Vec::new();

    let err = orchestrator
        .execute_observed(
            "weekly",
            OperationClass::WeeklyBatch,
            &token,
            |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err::<(), _>(api_error(attempt)) }
            },
            |state| states.push(*state),
        )
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(states.last(), Some(&TaskState::Cancelled { attempts: 1 }));
    assert!(err.last_error().is_none());
}

#[tokio::test]
async fn test_cancelled_before_start_never_runs() {
    let orchestrator = RetryOrchestrator::with_sleeper(RecordingSleeper::default());
    let token = CancellationToken::new();
    token.cancel();
    let calls = AtomicU32::new(0);

    let err = orchestrator
        .execute("generate", OperationClass::ContentGeneration, &token, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, GenerationError>(()) }
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        TaskErrorKind::Cancelled { attempts: 0, .. }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_single_attempt_limit_does_not_sleep() {
    let orchestrator =
        RetryOrchestrator::with_sleeper(RecordingSleeper::default()).with_max_attempts(0);
    let token = CancellationToken::new();

    let err = orchestrator
        .execute("generate", OperationClass::ContentGeneration, &token, |attempt| async move {
            Err::<(), _>(api_error(attempt))
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        TaskErrorKind::RetryExhausted { attempts: 1, .. }
    ));
    assert!(orchestrator.sleeper().delays().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_pool_holds_worker_through_backoff() {
    let pool = TaskPool::new(1, RetryOrchestrator::new());
    let started = tokio::time::Instant::now();
    let second_start = Arc::new(Mutex::new(None));

    let first = pool.spawn("first", OperationClass::ContentGeneration, |attempt| async move {
        if attempt == 1 {
            Err(api_error(attempt))
        } else {
            Ok(attempt)
        }
    });
    tokio::task::yield_now().await;

    let recorded = Arc::clone(&second_start);
    let second = pool.spawn("second", OperationClass::ContentGeneration, move |attempt| {
        let recorded = Arc::clone(&recorded);
        async move {
            recorded
                .lock()
                .unwrap()
                .get_or_insert(tokio::time::Instant::now());
            Ok::<_, GenerationError>(attempt)
        }
    });

    assert_eq!(first.await.unwrap().unwrap(), 2);
    assert_eq!(second.await.unwrap().unwrap(), 1);

    let second_at = (*second_start.lock().unwrap()).unwrap();
    let waited = second_at - started;
    assert!(waited >= Duration::from_secs(60), "second ran after {waited:?}");
    assert_eq!(pool.available(), 1);
}

#[tokio::test]
async fn test_pool_shutdown_refuses_new_work() {
    let pool = TaskPool::new(2, RetryOrchestrator::with_sleeper(RecordingSleeper::default()));
    pool.shutdown();

    let err = pool
        .run("late", OperationClass::Publish, |attempt| async move {
            Ok::<_, GenerationError>(attempt)
        })
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), TaskErrorKind::PoolClosed(_)));
    assert!(pool.token().is_cancelled());
    assert_eq!(pool.capacity(), 2);
}

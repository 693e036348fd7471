use fablecast_error::{
    ConfigError, FablecastError, FablecastErrorKind, GenerationError, GenerationErrorKind,
    PublishError, PublishErrorKind, PublishStage, TaskError, TaskErrorKind,
};

#[test]
fn test_transient_generation_failures() {
    let transient = [
        GenerationErrorKind::Http("timeout".to_string()),
        GenerationErrorKind::Api {
            status: 429,
            message: "slow down".to_string(),
        },
        GenerationErrorKind::Api {
            status: 503,
            message: String::new(),
        },
    ];
    for kind in transient {
        assert!(kind.is_transient(), "{kind} should be transient");
    }

    let permanent = [
        GenerationErrorKind::Api {
            status: 401,
            message: "bad key".to_string(),
        },
        GenerationErrorKind::EmptyResponse,
        GenerationErrorKind::Parse("missing field".to_string()),
    ];
    for kind in permanent {
        assert!(!kind.is_transient(), "{kind} should be permanent");
    }
}

#[test]
fn test_publish_stage_follows_kind() {
    let creation = PublishErrorKind::MediaCreation {
        index: 2,
        status: 400,
        message: "bad url".to_string(),
    };
    assert_eq!(creation.stage(), PublishStage::MediaCreation);
    assert_eq!(
        PublishErrorKind::InvalidRequest("empty".to_string()).stage(),
        PublishStage::MediaCreation
    );

    let rejected = PublishErrorKind::Rejected {
        stage: PublishStage::Insights,
        status: 403,
        message: "forbidden".to_string(),
    };
    assert_eq!(rejected.stage(), PublishStage::Insights);
    assert_eq!(PublishStage::MediaListing.to_string(), "media_listing");
}

#[test]
fn test_error_records_construction_site() {
    let err = PublishError::new(PublishErrorKind::MediaPublish {
        status: 500,
        message: "oops".to_string(),
    });
    assert_eq!(err.file, file!());
    assert!(err.to_string().contains("HTTP 500"));
}

#[test]
fn test_exhausted_retry_keeps_last_error() {
    let last: FablecastError =
        GenerationError::new(GenerationErrorKind::EmptyResponse).into();
    let err = TaskError::new(TaskErrorKind::RetryExhausted {
        operation: "generate_weekly".to_string(),
        attempts: 3,
        last_error: last,
    });

    assert!(!err.is_cancelled());
    let last = err.last_error().unwrap();
    assert!(matches!(last.kind(), FablecastErrorKind::Generation(_)));
    assert!(err.to_string().contains("generate_weekly failed after 3 attempts"));

    let wrapped: FablecastError = err.into();
    assert!(matches!(wrapped.kind(), FablecastErrorKind::Task(_)));
}

#[test]
fn test_cancelled_has_no_last_error() {
    let err = TaskError::new(TaskErrorKind::Cancelled {
        operation: "publish_video".to_string(),
        attempts: 1,
    });
    assert!(err.is_cancelled());
    assert!(err.last_error().is_none());
}

#[test]
fn test_each_category_converts_to_its_kind() {
    let config: FablecastError = ConfigError::new("INSTAGRAM_ACCESS_TOKEN not set").into();
    assert!(matches!(config.kind(), FablecastErrorKind::Config(_)));

    let generation: FablecastError =
        GenerationError::new(GenerationErrorKind::EmptyResponse).into();
    assert!(matches!(generation.kind(), FablecastErrorKind::Generation(_)));

    let publish: FablecastError =
        PublishError::new(PublishErrorKind::InvalidRequest("no assets".to_string())).into();
    assert!(matches!(publish.kind(), FablecastErrorKind::Publish(_)));

    let task: FablecastError =
        TaskError::new(TaskErrorKind::PoolClosed("generate_daily".to_string())).into();
    assert!(matches!(task.kind(), FablecastErrorKind::Task(_)));
}

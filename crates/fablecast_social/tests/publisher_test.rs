use chrono::{TimeZone, Timelike, Utc};
use fablecast_core::{ContentKind, ContentPiece, ContentPieceBuilder, PostStatus, Theme};
use fablecast_error::{PublishErrorKind, PublishStage};
use fablecast_rate_limit::RateLimiter;
use fablecast_social::{PlatformConfig, PublishingClient, Scheduler};
use httpmock::prelude::*;
use serde_json::json;
use std::num::NonZeroU32;

const ACCOUNT: &str = "1789";
const TOKEN: &str = "token-abc";

fn piece(kind: ContentKind) -> ContentPiece {
    let slides = (1..=kind.slide_count())
        .map(|i| format!("Slide {i}"))
        .collect::<Vec<_>>();
    let mut builder = ContentPieceBuilder::default();
    builder
        .theme(Theme::FantasyFriday)
        .kind(kind)
        .title("Dragon courage")
        .slides(slides)
        .caption("Be brave.")
        .hashtags(vec!["#MagicalParenting".to_string(), "#FantasyFriday".to_string()])
        .psychology_concept("emotional regulation")
        .motif("dragon courage")
        .target_age("3-10");
    builder.build().unwrap()
}

fn client(server: &MockServer, limiter: RateLimiter) -> PublishingClient {
    let config = PlatformConfig::new(ACCOUNT, TOKEN).with_base_url(server.base_url());
    PublishingClient::new(config, limiter)
        .unwrap()
        .with_scheduler(Scheduler::without_jitter())
}

fn roomy_limiter() -> RateLimiter {
    RateLimiter::per_hour(NonZeroU32::new(200).unwrap())
}

fn image_urls(count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("https://cdn.example.com/{i}.png"))
        .collect()
}

#[tokio::test]
async fn test_carousel_creates_each_item_then_publishes() {
    let server = MockServer::start_async().await;
    let urls = image_urls(5);

    let mut item_mocks = Vec::new();
    for (i, url) in urls.iter().enumerate() {
        let caption = format!("Slide {}", i + 1);
        let id = format!("item-{i}");
        item_mocks.push(
            server
                .mock_async(|when, then| {
                    when.method(POST)
                        .path(format!("/v18.0/{ACCOUNT}/media"))
                        .x_www_form_urlencoded_tuple("image_url", url)
                        .x_www_form_urlencoded_tuple("caption", caption)
                        .x_www_form_urlencoded_tuple("access_token", TOKEN);
                    then.status(200).json_body(json!({ "id": id }));
                })
                .await,
        );
    }
    let publish = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media_publish"))
                .x_www_form_urlencoded_tuple("media_type", "CAROUSEL")
                .x_www_form_urlencoded_tuple("children", "item-0,item-1,item-2,item-3,item-4")
                .x_www_form_urlencoded_tuple(
                    "caption",
                    "Be brave.\n\n#MagicalParenting #FantasyFriday",
                );
            then.status(200).json_body(json!({ "id": "post-99" }));
        })
        .await;

    let limiter = roomy_limiter();
    let published = client(&server, limiter.clone())
        .publish_carousel(&piece(ContentKind::Carousel), &urls)
        .await
        .unwrap();

    assert_eq!(published.post_id(), "post-99");
    assert_eq!(published.post_url(), "https://instagram.com/p/post-99");
    for mock in &item_mocks {
        mock.assert_async().await;
    }
    publish.assert_async().await;
    // five containers plus the publish call
    assert_eq!(limiter.remaining().await, 200 - 6);
}

#[tokio::test]
async fn test_third_item_failure_aborts_before_publish() {
    let server = MockServer::start_async().await;
    let urls = image_urls(5);

    let mut item_mocks = Vec::new();
    for (i, url) in urls.iter().enumerate() {
        let id = format!("item-{i}");
        item_mocks.push(
            server
                .mock_async(|when, then| {
                    when.method(POST)
                        .path(format!("/v18.0/{ACCOUNT}/media"))
                        .x_www_form_urlencoded_tuple("image_url", url);
                    if i == 2 {
                        then.status(400).body("image could not be fetched");
                    } else {
                        then.status(200).json_body(json!({ "id": id }));
                    };
                })
                .await,
        );
    }
    let publish = server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/v18.0/{ACCOUNT}/media_publish"));
            then.status(200).json_body(json!({ "id": "never" }));
        })
        .await;

    let err = client(&server, roomy_limiter())
        .publish_carousel(&piece(ContentKind::Carousel), &urls)
        .await
        .unwrap_err();

    match err.kind() {
        PublishErrorKind::MediaCreation {
            index,
            status,
            message,
        } => {
            assert_eq!(*index, 2);
            assert_eq!(*status, 400);
            assert_eq!(message, "image could not be fetched");
        }
        other => panic!("unexpected error kind: {other}"),
    }
    assert_eq!(err.stage(), PublishStage::MediaCreation);
    item_mocks[0].assert_hits_async(1).await;
    item_mocks[1].assert_hits_async(1).await;
    item_mocks[2].assert_hits_async(1).await;
    item_mocks[3].assert_hits_async(0).await;
    item_mocks[4].assert_hits_async(0).await;
    publish.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_extra_images_get_empty_caption() {
    let server = MockServer::start_async().await;
    let media = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media"))
                .x_www_form_urlencoded_tuple("caption", "");
            then.status(200).json_body(json!({ "id": "extra" }));
        })
        .await;
    let first = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media"))
                .x_www_form_urlencoded_tuple("caption", "Slide 1");
            then.status(200).json_body(json!({ "id": "first" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media_publish"))
                .x_www_form_urlencoded_tuple("children", "first,extra");
            then.status(200).json_body(json!({ "id": "post-2" }));
        })
        .await;

    let mut builder = ContentPieceBuilder::default();
    builder
        .theme(Theme::StorySaturday)
        .kind(ContentKind::Story)
        .title("One frame")
        .slides(vec!["Slide 1".to_string()])
        .caption("c")
        .psychology_concept("empathy development")
        .motif("owl wisdom")
        .target_age("3-10");
    let single = builder.build().unwrap();

    let published = client(&server, roomy_limiter())
        .publish_carousel(&single, &image_urls(2))
        .await
        .unwrap();

    assert_eq!(published.post_id(), "post-2");
    first.assert_hits_async(1).await;
    media.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_video_creates_reel_then_publishes_creation_id() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media"))
                .x_www_form_urlencoded_tuple("media_type", "REELS")
                .x_www_form_urlencoded_tuple("video_url", "https://cdn.example.com/v.mp4")
                .x_www_form_urlencoded_tuple(
                    "caption",
                    "Be brave.\n\n#MagicalParenting #FantasyFriday",
                );
            then.status(200).json_body(json!({ "id": "container-7" }));
        })
        .await;
    let publish = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media_publish"))
                .x_www_form_urlencoded_tuple("creation_id", "container-7");
            then.status(200).json_body(json!({ "id": "reel-1" }));
        })
        .await;

    let published = client(&server, roomy_limiter())
        .publish_video(&piece(ContentKind::Video), "https://cdn.example.com/v.mp4")
        .await
        .unwrap();

    assert_eq!(published.post_id(), "reel-1");
    create.assert_async().await;
    publish.assert_async().await;
}

#[tokio::test]
async fn test_video_publish_rejection_is_publish_stage() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/v18.0/{ACCOUNT}/media"));
            then.status(200).json_body(json!({ "id": "container-7" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/v18.0/{ACCOUNT}/media_publish"));
            then.status(500).body("try later");
        })
        .await;

    let err = client(&server, roomy_limiter())
        .publish_video(&piece(ContentKind::Video), "https://cdn.example.com/v.mp4")
        .await
        .unwrap_err();

    assert_eq!(err.stage(), PublishStage::MediaPublish);
    assert!(err.to_string().contains("try later"));
}

#[tokio::test]
async fn test_publish_scheduled_records_outcome() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/v18.0/{ACCOUNT}/media"));
            then.status(200).json_body(json!({ "id": "c" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(format!("/v18.0/{ACCOUNT}/media_publish"));
            then.status(200).json_body(json!({ "id": "p" }));
        })
        .await;

    let client = client(&server, roomy_limiter());
    let start = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let mut posts = client.schedule_content(
        vec![piece(ContentKind::Video), piece(ContentKind::Video)],
        start,
    );

    assert_eq!(posts[0].scheduled_time().hour(), 9);
    assert_eq!(posts[1].scheduled_time().hour(), 12);
    assert!(posts.iter().all(|p| *p.status() == PostStatus::Scheduled));

    client
        .publish_scheduled(&mut posts[0], &["https://cdn.example.com/v.mp4".to_string()])
        .await
        .unwrap();
    assert_eq!(*posts[0].status(), PostStatus::Posted);
    assert_eq!(posts[0].published().as_ref().unwrap().post_id(), "p");

    let err = client.publish_scheduled(&mut posts[1], &[]).await.unwrap_err();
    assert!(matches!(err.kind(), PublishErrorKind::InvalidRequest(_)));
    assert_eq!(*posts[1].status(), PostStatus::Failed);
    assert!(posts[1].failure().as_deref().unwrap().contains("asset URL"));
}

#[tokio::test]
async fn test_publish_piece_dispatches_by_kind() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media"))
                .x_www_form_urlencoded_tuple("media_type", "STORIES")
                .x_www_form_urlencoded_tuple("image_url", "https://cdn.example.com/1.png");
            then.status(200).json_body(json!({ "id": "story-container" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/v18.0/{ACCOUNT}/media_publish"))
                .x_www_form_urlencoded_tuple("creation_id", "story-container");
            then.status(200).json_body(json!({ "id": "story-1" }));
        })
        .await;

    let client = client(&server, roomy_limiter());
    let published = client
        .publish_piece(&piece(ContentKind::Story), &image_urls(2))
        .await
        .unwrap();
    assert_eq!(published.post_id(), "story-1");

    let err = client
        .publish_piece(&piece(ContentKind::Carousel), &[])
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), PublishErrorKind::InvalidRequest(_)));
    assert!(err.to_string().contains("carousel needs an asset URL"));
    create.assert_hits_async(1).await;

    assert!(PublishingClient::check_assets(ContentKind::Video, &[]).is_err());
    assert!(PublishingClient::check_assets(ContentKind::Video, &image_urls(1)).is_ok());
}

#[tokio::test]
async fn test_account_insights_pass_through() {
    let server = MockServer::start_async().await;
    let body = json!({ "data": [{ "name": "reach", "values": [{ "value": 42 }] }] });
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v18.0/{ACCOUNT}/insights"))
                .query_param(
                    "metric",
                    "impressions,reach,profile_views,follower_count,email_contacts,phone_call_clicks,text_message_clicks",
                )
                .query_param("period", "day")
                .query_param("access_token", TOKEN);
            then.status(200).json_body(body.clone());
        })
        .await;

    let insights = client(&server, roomy_limiter())
        .account_insights()
        .await
        .unwrap();

    assert_eq!(insights, body);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_insights_rejection_names_stage() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v18.0/post-5/insights")
                .query_param(
                    "metric",
                    "impressions,reach,engagement,saved,video_views,video_view_rate",
                );
            then.status(403).body("permissions error");
        })
        .await;

    let err = client(&server, roomy_limiter())
        .post_insights("post-5")
        .await
        .unwrap_err();

    assert_eq!(err.stage(), PublishStage::Insights);
    assert_eq!(err.stage().to_string(), "insights");
}

#[tokio::test]
async fn test_scheduled_media_skips_published() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v18.0/{ACCOUNT}/media"))
                .query_param("fields", "id,media_type,media_url,thumbnail_url,created_time");
            then.status(200).json_body(json!({
                "data": [
                    { "id": "m1", "media_type": "IMAGE", "created_time": "2026-06-01T09:00:00+0000" },
                    { "id": "m2", "media_type": "VIDEO", "published": true }
                ]
            }));
        })
        .await;

    let pending = client(&server, roomy_limiter())
        .scheduled_media()
        .await
        .unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].media_id(), "m1");
    assert_eq!(pending[0].media_type().as_deref(), Some("IMAGE"));
    assert_eq!(*pending[0].status(), PostStatus::Scheduled);
}

#[tokio::test]
async fn test_connection_reports_account() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v18.0/{ACCOUNT}"))
                .query_param("access_token", TOKEN);
            then.status(200)
                .json_body(json!({ "username": "magicalparenting", "followers_count": 1200 }));
        })
        .await;

    let status = client(&server, roomy_limiter())
        .test_connection()
        .await
        .unwrap();

    assert_eq!(status.account_name(), "Unknown");
    assert_eq!(status.username(), "magicalparenting");
    assert_eq!(*status.followers(), 1200);
    assert_eq!(*status.media_count(), 0);
}

#[tokio::test]
async fn test_every_request_claims_a_rate_slot() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v18.0/{ACCOUNT}"));
            then.status(200).json_body(json!({}));
        })
        .await;

    let limiter = RateLimiter::per_hour(NonZeroU32::new(3).unwrap());
    let client = client(&server, limiter.clone());
    client.test_connection().await.unwrap();
    client.test_connection().await.unwrap();

    assert_eq!(limiter.remaining().await, 1);
}

#[tokio::test]
async fn test_missing_credentials_rejected() {
    let limiter = roomy_limiter();
    assert!(PublishingClient::new(PlatformConfig::new("", TOKEN), limiter.clone()).is_err());
    assert!(PublishingClient::new(PlatformConfig::new(ACCOUNT, " "), limiter).is_err());
}

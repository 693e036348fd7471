//! Instagram Graph API publishing client.

use crate::dto::{AccountInfo, CreatedId};
use crate::{ConnectionStatus, EngagementEstimator, MediaListing, PendingMedia, Scheduler};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use fablecast_core::{ContentKind, ContentPiece, PublishedPost, ScheduledPost};
use fablecast_error::{ConfigError, PublishError, PublishErrorKind, PublishResult, PublishStage};
use fablecast_rate_limit::RateLimiter;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default Graph API root.
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Default Graph API version.
pub const DEFAULT_API_VERSION: &str = "v18.0";

/// Metrics requested by [`PublishingClient::account_insights`].
pub const ACCOUNT_METRICS: [&str; 7] = [
    "impressions",
    "reach",
    "profile_views",
    "follower_count",
    "email_contacts",
    "phone_call_clicks",
    "text_message_clicks",
];

/// Metrics requested by [`PublishingClient::post_insights`].
pub const POST_METRICS: [&str; 6] = [
    "impressions",
    "reach",
    "engagement",
    "saved",
    "video_views",
    "video_view_rate",
];

const MEDIA_FIELDS: &str = "id,media_type,media_url,thumbnail_url,created_time";
const ACCOUNT_FIELDS: &str = "name,username,followers_count,media_count";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Public URL of a published post.
///
/// # Examples
///
/// ```
/// assert_eq!(fablecast_social::post_url("123"), "https://instagram.com/p/123");
/// ```
pub fn post_url(post_id: &str) -> String {
    format!("https://instagram.com/p/{post_id}")
}

/// Where and as whom to publish.
#[derive(Clone, Getters)]
pub struct PlatformConfig {
    /// API root without version, e.g. `https://graph.facebook.com`
    base_url: String,
    /// API version path segment
    api_version: String,
    /// Instagram business account id
    account_id: String,
    /// Long-lived access token
    access_token: String,
}

impl std::fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("account_id", &self.account_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl PlatformConfig {
    /// Configuration for the public Graph API.
    pub fn new(account_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_GRAPH_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            account_id: account_id.into(),
            access_token: access_token.into(),
        }
    }

    /// Read `INSTAGRAM_ACCESS_TOKEN` and `INSTAGRAM_BUSINESS_ACCOUNT_ID`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first missing variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let access_token = std::env::var("INSTAGRAM_ACCESS_TOKEN")
            .map_err(|e| ConfigError::new(format!("INSTAGRAM_ACCESS_TOKEN not set: {}", e)))?;
        let account_id = std::env::var("INSTAGRAM_BUSINESS_ACCOUNT_ID").map_err(|e| {
            ConfigError::new(format!("INSTAGRAM_BUSINESS_ACCOUNT_ID not set: {}", e))
        })?;
        Ok(Self::new(account_id, access_token))
    }

    /// Override the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the API version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_version, path)
    }
}

/// Publishes content through the two-phase media protocol.
///
/// Every HTTP request first claims a slot from the injected [`RateLimiter`],
/// so clones of one limiter shared between clients enforce a single budget.
/// Any non-2xx answer becomes a [`PublishError`] naming the failing stage.
#[derive(Debug, Clone)]
pub struct PublishingClient {
    http: reqwest::Client,
    config: PlatformConfig,
    limiter: RateLimiter,
    scheduler: Scheduler,
    estimator: EngagementEstimator,
}

impl PublishingClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the account id or token is empty, or the
    /// HTTP client cannot be built.
    pub fn new(config: PlatformConfig, limiter: RateLimiter) -> Result<Self, ConfigError> {
        if config.access_token.trim().is_empty() {
            return Err(ConfigError::new("Instagram access token is required"));
        }
        if config.account_id.trim().is_empty() {
            return Err(ConfigError::new("Instagram business account id is required"));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            limiter,
            scheduler: Scheduler::default(),
            estimator: EngagementEstimator::new(),
        })
    }

    /// Use a different posting-time scheduler.
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Platform configuration in use.
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Rate limiter gating every request.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Assign posting times and engagement estimates to a batch.
    pub fn schedule_content(
        &self,
        pieces: Vec<ContentPiece>,
        start: DateTime<Utc>,
    ) -> Vec<ScheduledPost> {
        self.scheduler
            .schedule(pieces, start, &self.estimator, &mut rand::thread_rng())
    }

    /// Publish a carousel, one media container per image.
    ///
    /// Image `i` is captioned with slide `i`, or nothing when there are more
    /// images than slides. The first failed container aborts the publish; any
    /// containers already created are left on the platform unpublished.
    #[instrument(skip_all, fields(title = %piece.title(), images = image_urls.len()))]
    pub async fn publish_carousel(
        &self,
        piece: &ContentPiece,
        image_urls: &[String],
    ) -> PublishResult<PublishedPost> {
        if image_urls.is_empty() {
            return Err(PublishError::new(PublishErrorKind::InvalidRequest(
                "carousel needs at least one image".to_string(),
            )));
        }

        let mut children = Vec::with_capacity(image_urls.len());
        for (index, image_url) in image_urls.iter().enumerate() {
            let caption = piece.slides().get(index).cloned().unwrap_or_default();
            let id = self
                .create_media(
                    index,
                    vec![("image_url", image_url.clone()), ("caption", caption)],
                )
                .await?;
            debug!(index, media_id = %id, "Created carousel item");
            children.push(id);
        }

        self.publish_media(vec![
            ("caption", piece.caption_with_hashtags()),
            ("media_type", "CAROUSEL".to_string()),
            ("children", children.join(",")),
        ])
        .await
    }

    /// Publish a reel from a hosted video.
    #[instrument(skip_all, fields(title = %piece.title()))]
    pub async fn publish_video(
        &self,
        piece: &ContentPiece,
        video_url: &str,
    ) -> PublishResult<PublishedPost> {
        let id = self
            .create_media(
                0,
                vec![
                    ("media_type", "REELS".to_string()),
                    ("video_url", video_url.to_string()),
                    ("caption", piece.caption_with_hashtags()),
                ],
            )
            .await?;
        self.publish_media(vec![("creation_id", id)]).await
    }

    /// Publish a single-frame story from a hosted image.
    #[instrument(skip_all, fields(title = %piece.title()))]
    pub async fn publish_story(
        &self,
        piece: &ContentPiece,
        image_url: &str,
    ) -> PublishResult<PublishedPost> {
        let id = self
            .create_media(
                0,
                vec![
                    ("media_type", "STORIES".to_string()),
                    ("image_url", image_url.to_string()),
                    ("caption", piece.caption_with_hashtags()),
                ],
            )
            .await?;
        self.publish_media(vec![("creation_id", id)]).await
    }

    /// Reject an asset list that cannot carry a piece of `kind`.
    ///
    /// Every kind needs at least one hosted asset; nothing is sent.
    pub fn check_assets(kind: ContentKind, asset_urls: &[String]) -> PublishResult<()> {
        if asset_urls.is_empty() {
            return Err(missing_assets(kind));
        }
        Ok(())
    }

    /// Publish a piece by kind. Videos and stories use the first asset URL.
    pub async fn publish_piece(
        &self,
        piece: &ContentPiece,
        asset_urls: &[String],
    ) -> PublishResult<PublishedPost> {
        let Some(first) = asset_urls.first() else {
            return Err(missing_assets(*piece.kind()));
        };
        match piece.kind() {
            ContentKind::Carousel => self.publish_carousel(piece, asset_urls).await,
            ContentKind::Video => self.publish_video(piece, first).await,
            ContentKind::Story => self.publish_story(piece, first).await,
        }
    }

    /// Publish a scheduled post by kind and record the outcome on it.
    pub async fn publish_scheduled(
        &self,
        post: &mut ScheduledPost,
        asset_urls: &[String],
    ) -> PublishResult<PublishedPost> {
        let result = self.publish_piece(post.content(), asset_urls).await;
        match &result {
            Ok(published) => post.mark_posted(published.clone()),
            Err(e) => post.mark_failed(e.kind().to_string()),
        }
        result
    }

    /// Daily account metrics, passed through unmodified.
    #[instrument(skip(self))]
    pub async fn account_insights(&self) -> PublishResult<serde_json::Value> {
        let request = self
            .http
            .get(self.config.url(&format!("{}/insights", self.config.account_id)))
            .query(&[
                ("metric", ACCOUNT_METRICS.join(",")),
                ("period", "day".to_string()),
                ("access_token", self.config.access_token.clone()),
            ]);
        self.fetch(request, PublishStage::Insights).await
    }

    /// Metrics for one post, passed through unmodified.
    #[instrument(skip(self))]
    pub async fn post_insights(&self, post_id: &str) -> PublishResult<serde_json::Value> {
        let request = self
            .http
            .get(self.config.url(&format!("{post_id}/insights")))
            .query(&[
                ("metric", POST_METRICS.join(",")),
                ("access_token", self.config.access_token.clone()),
            ]);
        self.fetch(request, PublishStage::Insights).await
    }

    /// Media created on the account but not yet published.
    #[instrument(skip(self))]
    pub async fn scheduled_media(&self) -> PublishResult<Vec<PendingMedia>> {
        let request = self
            .http
            .get(self.config.url(&format!("{}/media", self.config.account_id)))
            .query(&[
                ("fields", MEDIA_FIELDS),
                ("access_token", self.config.access_token.as_str()),
            ]);
        let listing: MediaListing = self.fetch(request, PublishStage::MediaListing).await?;
        Ok(listing.pending())
    }

    /// Fetch basic account information to verify the credentials.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> PublishResult<ConnectionStatus> {
        let request = self
            .http
            .get(self.config.url(&self.config.account_id))
            .query(&[
                ("fields", ACCOUNT_FIELDS),
                ("access_token", self.config.access_token.as_str()),
            ]);
        let info: AccountInfo = self.fetch(request, PublishStage::Connection).await?;
        let status = ConnectionStatus::from(info);
        info!(username = %status.username(), "Connected to Instagram");
        Ok(status)
    }

    async fn create_media(
        &self,
        index: usize,
        mut form: Vec<(&'static str, String)>,
    ) -> PublishResult<String> {
        form.push(("access_token", self.config.access_token.clone()));
        let request = self
            .http
            .post(self.config.url(&format!("{}/media", self.config.account_id)))
            .form(&form);

        let (status, body) = self.send(request, PublishStage::MediaCreation).await?;
        if !status.is_success() {
            warn!(index, status = status.as_u16(), "Media creation rejected");
            return Err(PublishError::new(PublishErrorKind::MediaCreation {
                index,
                status: status.as_u16(),
                message: body,
            }));
        }
        let created: CreatedId = parse(&body, PublishStage::MediaCreation)?;
        Ok(created.id)
    }

    async fn publish_media(
        &self,
        mut form: Vec<(&'static str, String)>,
    ) -> PublishResult<PublishedPost> {
        form.push(("access_token", self.config.access_token.clone()));
        let request = self
            .http
            .post(self.config.url(&format!("{}/media_publish", self.config.account_id)))
            .form(&form);

        let (status, body) = self.send(request, PublishStage::MediaPublish).await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Media publish rejected");
            return Err(PublishError::new(PublishErrorKind::MediaPublish {
                status: status.as_u16(),
                message: body,
            }));
        }
        let created: CreatedId = parse(&body, PublishStage::MediaPublish)?;
        info!(post_id = %created.id, "Published post");
        Ok(PublishedPost::new(
            created.id.clone(),
            post_url(&created.id),
            Utc::now(),
        ))
    }

    /// Send a read request and decode a 2xx body.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        stage: PublishStage,
    ) -> PublishResult<T> {
        let (status, body) = self.send(request, stage).await?;
        if !status.is_success() {
            return Err(PublishError::new(PublishErrorKind::Rejected {
                stage,
                status: status.as_u16(),
                message: body,
            }));
        }
        parse(&body, stage)
    }

    /// Claim a rate-limit slot, then send and read the body.
    async fn send(
        &self,
        request: RequestBuilder,
        stage: PublishStage,
    ) -> PublishResult<(StatusCode, String)> {
        self.limiter.acquire().await;
        let response = request
            .send()
            .await
            .map_err(|e| transport(stage, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport(stage, e))?;
        Ok((status, body))
    }
}

fn transport(stage: PublishStage, e: reqwest::Error) -> PublishError {
    PublishError::new(PublishErrorKind::Transport {
        stage,
        message: e.to_string(),
    })
}

fn missing_assets(kind: ContentKind) -> PublishError {
    PublishError::new(PublishErrorKind::InvalidRequest(format!(
        "{kind} needs an asset URL"
    )))
}

fn parse<T: DeserializeOwned>(body: &str, stage: PublishStage) -> PublishResult<T> {
    serde_json::from_str(body).map_err(|e| {
        PublishError::new(PublishErrorKind::Parse {
            stage,
            message: e.to_string(),
        })
    })
}

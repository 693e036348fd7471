//! Operations exposed to callers.

use crate::{FablecastConfig, FailureStage, Outcome};
use chrono::{DateTime, Local, NaiveDate, Utc};
use fablecast_content::{ContentGenerator, DailyContent};
use fablecast_core::{ContentKind, ContentPiece, PublishedPost, ScheduledPost, Theme};
use fablecast_error::{ConfigError, FablecastError, FablecastResult};
use fablecast_models::{GenerativeBackend, OpenAiClient};
use fablecast_social::{ConnectionStatus, PendingMedia, PlatformConfig, PublishingClient};
use fablecast_tasks::{OperationClass, Sleeper, TaskPool, TokioSleeper};
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Generation and publishing behind one boundary.
///
/// Generation runs through the retry pool (a single piece never fails, so only
/// cancellation can end it unsuccessfully). Publishing runs through the pool
/// with publish-class backoff. Read-only platform calls are issued once.
/// Every operation returns an [`Outcome`].
///
/// # Example
///
/// ```no_run
/// use fablecast::{ContentService, FablecastConfig};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FablecastConfig::load()?;
/// let service = ContentService::from_config(&config)?;
/// let today = service.generate_daily().await;
/// println!("{}", serde_json::to_string_pretty(&today)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ContentService<B, S = TokioSleeper> {
    generator: ContentGenerator<B>,
    publisher: PublishingClient,
    pool: TaskPool<S>,
}

impl ContentService<OpenAiClient> {
    /// Build production clients from configuration and environment secrets.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a credential is missing or a rate is zero.
    #[instrument(skip_all)]
    pub fn from_config(config: &FablecastConfig) -> FablecastResult<Self> {
        let generation = config.generation();
        let backend = OpenAiClient::from_env(generation.model().clone())?
            .with_base_url(generation.base_url().clone())
            .with_throttle(generation.throttle()?);
        let generator = ContentGenerator::new(backend)
            .with_sampling(*generation.temperature(), *generation.max_tokens());

        let platform = config.platform();
        let access_token = std::env::var("INSTAGRAM_ACCESS_TOKEN")
            .map_err(|e| ConfigError::new(format!("INSTAGRAM_ACCESS_TOKEN not set: {}", e)))?;
        let account_id = if platform.account_id().is_empty() {
            std::env::var("INSTAGRAM_BUSINESS_ACCOUNT_ID").map_err(|e| {
                ConfigError::new(format!("INSTAGRAM_BUSINESS_ACCOUNT_ID not set: {}", e))
            })?
        } else {
            platform.account_id().clone()
        };
        let platform_config = PlatformConfig::new(account_id, access_token)
            .with_base_url(platform.base_url().clone())
            .with_api_version(platform.api_version().clone());
        let publisher = PublishingClient::new(platform_config, platform.limiter()?)?
            .with_scheduler(config.schedule().scheduler());

        info!(model = %generation.model(), "Content service configured");
        Ok(Self::new(generator, publisher, config.retry().pool()))
    }
}

impl<B, S> ContentService<B, S>
where
    B: GenerativeBackend,
    S: Sleeper + 'static,
{
    /// Assemble a service from its parts.
    pub fn new(generator: ContentGenerator<B>, publisher: PublishingClient, pool: TaskPool<S>) -> Self {
        Self {
            generator,
            publisher,
            pool,
        }
    }

    /// Content generator.
    pub fn generator(&self) -> &ContentGenerator<B> {
        &self.generator
    }

    /// Publishing client.
    pub fn publisher(&self) -> &PublishingClient {
        &self.publisher
    }

    /// Retry pool.
    pub fn pool(&self) -> &TaskPool<S> {
        &self.pool
    }

    /// Today's carousel, plus a video on Mondays, Wednesdays and Fridays.
    pub async fn generate_daily(&self) -> Outcome<DailyContent> {
        self.generate_daily_for(Local::now().date_naive()).await
    }

    /// Daily content for a given date.
    #[instrument(skip(self))]
    pub async fn generate_daily_for(&self, date: NaiveDate) -> Outcome<DailyContent> {
        self.pool
            .run("generate_daily", OperationClass::ContentGeneration, |_| async move {
                Ok::<_, FablecastError>(self.generator.generate_daily(date).await)
            })
            .await
            .into()
    }

    /// A week of content starting today.
    pub async fn generate_weekly(&self) -> Outcome<Vec<DailyContent>> {
        self.generate_weekly_from(Local::now().date_naive()).await
    }

    /// A week of content starting at `start`.
    #[instrument(skip(self))]
    pub async fn generate_weekly_from(&self, start: NaiveDate) -> Outcome<Vec<DailyContent>> {
        self.pool
            .run("generate_weekly", OperationClass::WeeklyBatch, |_| async move {
                Ok::<_, FablecastError>(self.generator.generate_weekly(start).await)
            })
            .await
            .into()
    }

    /// The story-bot teaser carousels.
    #[instrument(skip(self))]
    pub async fn generate_campaign(&self) -> Outcome<Vec<ContentPiece>> {
        self.pool
            .run("generate_campaign", OperationClass::Campaign, |_| async move {
                Ok::<_, FablecastError>(self.generator.generate_campaign().await)
            })
            .await
            .into()
    }

    /// One piece for an explicit theme, optional topic and kind.
    #[instrument(skip(self))]
    pub async fn generate_custom(
        &self,
        theme: Theme,
        topic: Option<&str>,
        kind: ContentKind,
    ) -> Outcome<ContentPiece> {
        self.pool
            .run("generate_custom", OperationClass::ContentGeneration, |_| async move {
                Ok::<_, FablecastError>(self.generator.generate(theme, topic, kind).await)
            })
            .await
            .into()
    }

    /// [`generate_custom`](Self::generate_custom) from wire strings such as
    /// `"wonder_wednesday"` and `"video"`.
    pub async fn generate_custom_raw(
        &self,
        theme: &str,
        topic: Option<&str>,
        kind: &str,
    ) -> Outcome<ContentPiece> {
        let Ok(parsed_theme) = Theme::from_str(theme) else {
            return Outcome::failure(FailureStage::InvalidInput, format!("unknown theme: {theme}"));
        };
        let Ok(parsed_kind) = ContentKind::from_str(kind) else {
            return Outcome::failure(
                FailureStage::InvalidInput,
                format!("unknown content kind: {kind}"),
            );
        };
        self.generate_custom(parsed_theme, topic, parsed_kind).await
    }

    /// Publish a carousel from hosted images.
    #[instrument(skip_all, fields(title = %piece.title()))]
    pub async fn publish_carousel(
        &self,
        piece: &ContentPiece,
        image_urls: &[String],
    ) -> Outcome<PublishedPost> {
        if let Err(e) = PublishingClient::check_assets(ContentKind::Carousel, image_urls) {
            return Err::<PublishedPost, _>(e).into();
        }
        self.pool
            .run("publish_carousel", OperationClass::Publish, |_| {
                self.publisher.publish_carousel(piece, image_urls)
            })
            .await
            .into()
    }

    /// Publish a reel from a hosted video.
    #[instrument(skip_all, fields(title = %piece.title()))]
    pub async fn publish_video(&self, piece: &ContentPiece, video_url: &str) -> Outcome<PublishedPost> {
        self.pool
            .run("publish_video", OperationClass::Publish, |_| {
                self.publisher.publish_video(piece, video_url)
            })
            .await
            .into()
    }

    /// Publish a story from a hosted image.
    #[instrument(skip_all, fields(title = %piece.title()))]
    pub async fn publish_story(&self, piece: &ContentPiece, image_url: &str) -> Outcome<PublishedPost> {
        self.pool
            .run("publish_story", OperationClass::Publish, |_| {
                self.publisher.publish_story(piece, image_url)
            })
            .await
            .into()
    }

    /// Publish a piece by kind. Videos and stories use the first asset URL.
    #[instrument(skip_all, fields(title = %piece.title(), kind = %piece.kind()))]
    pub async fn publish_piece(
        &self,
        piece: &ContentPiece,
        asset_urls: &[String],
    ) -> Outcome<PublishedPost> {
        if let Err(e) = PublishingClient::check_assets(*piece.kind(), asset_urls) {
            return Err::<PublishedPost, _>(e).into();
        }
        let operation = format!("publish_{}", piece.kind());
        self.pool
            .run(&operation, OperationClass::Publish, |_| {
                self.publisher.publish_piece(piece, asset_urls)
            })
            .await
            .into()
    }

    /// Publish a scheduled post and record the outcome on it.
    ///
    /// Every attempt goes through the publisher, which marks the post posted
    /// or failed; after retries the post reflects the final attempt.
    #[instrument(skip_all, fields(title = %post.content().title()))]
    pub async fn publish_scheduled(
        &self,
        post: &mut ScheduledPost,
        asset_urls: &[String],
    ) -> Outcome<PublishedPost> {
        let kind = *post.content().kind();
        if PublishingClient::check_assets(kind, asset_urls).is_err() {
            // Fails before any request; not retried.
            return self.publisher.publish_scheduled(post, asset_urls).await.into();
        }

        let operation = format!("publish_{kind}");
        let post = Mutex::new(post);
        self.pool
            .run(&operation, OperationClass::Publish, |_| {
                let post = &post;
                async move {
                    let mut post = post.lock().await;
                    self.publisher.publish_scheduled(&mut **post, asset_urls).await
                }
            })
            .await
            .into()
    }

    /// Daily account metrics, passed through unmodified.
    pub async fn get_insights(&self) -> Outcome<serde_json::Value> {
        self.publisher.account_insights().await.into()
    }

    /// Metrics for one published post, passed through unmodified.
    pub async fn get_post_insights(&self, post_id: &str) -> Outcome<serde_json::Value> {
        self.publisher.post_insights(post_id).await.into()
    }

    /// Account media not yet published.
    pub async fn get_scheduled_posts(&self) -> Outcome<Vec<PendingMedia>> {
        self.publisher.scheduled_media().await.into()
    }

    /// Account profile, for health reporting.
    pub async fn test_connection(&self) -> Outcome<ConnectionStatus> {
        self.publisher.test_connection().await.into()
    }

    /// Assign posting times and engagement estimates to a batch.
    pub fn schedule_content(
        &self,
        pieces: Vec<ContentPiece>,
        start: DateTime<Utc>,
    ) -> Vec<ScheduledPost> {
        self.publisher.schedule_content(pieces, start)
    }

    /// Cancel in-flight operations and refuse new ones.
    pub fn shutdown(&self) {
        info!("Shutting down content service");
        self.pool.shutdown();
    }
}

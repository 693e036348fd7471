//! Daily, weekly and campaign batches.
//!
//! Batches generate sequentially so output order is deterministic and the
//! backend sees one request at a time.

use crate::{CAMPAIGN_TOPICS, ContentGenerator};
use chrono::{Days, NaiveDate};
use derive_getters::Getters;
use fablecast_core::{ContentKind, ContentPiece, Theme, is_video_day, theme_for_date};
use fablecast_models::GenerativeBackend;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// Positions within a weekly batch that also get a video.
const WEEKLY_VIDEO_POSITIONS: [usize; 3] = [0, 2, 4];

/// Pieces generated for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct DailyContent {
    /// Date the pieces are meant for
    date: NaiveDate,
    /// Theme they were generated under
    theme: Theme,
    /// Carousel first, then the video if there is one
    pieces: Vec<ContentPiece>,
}

impl DailyContent {
    /// Consume into the generated pieces.
    pub fn into_pieces(self) -> Vec<ContentPiece> {
        self.pieces
    }
}

impl<B: GenerativeBackend> ContentGenerator<B> {
    /// Content for `date`: a carousel under the date's theme, plus a video on
    /// Mondays, Wednesdays and Fridays.
    #[instrument(skip_all, fields(date = %date))]
    pub async fn generate_daily(&self, date: NaiveDate) -> DailyContent {
        let theme = theme_for_date(date);
        let mut pieces = vec![self.generate(theme, None, ContentKind::Carousel).await];
        if is_video_day(date) {
            pieces.push(self.generate(theme, None, ContentKind::Video).await);
        }

        info!(theme = %theme, count = pieces.len(), "Generated daily content");
        DailyContent {
            date,
            theme,
            pieces,
        }
    }

    /// Seven days of content starting at `start`.
    ///
    /// Themes run in calendar order from Monday, one per day. Every day gets a
    /// carousel; the first, third and fifth days also get a video.
    #[instrument(skip_all, fields(start = %start))]
    pub async fn generate_weekly(&self, start: NaiveDate) -> Vec<DailyContent> {
        let mut week = Vec::with_capacity(7);

        for (position, theme) in Theme::iter().enumerate() {
            let date = start + Days::new(position as u64);
            let mut pieces = vec![self.generate(theme, None, ContentKind::Carousel).await];
            if WEEKLY_VIDEO_POSITIONS.contains(&position) {
                pieces.push(self.generate(theme, None, ContentKind::Video).await);
            }
            week.push(DailyContent {
                date,
                theme,
                pieces,
            });
        }

        info!(
            pieces = week.iter().map(|day| day.pieces.len()).sum::<usize>(),
            "Generated weekly content"
        );
        week
    }

    /// One story-saturday carousel per story-bot teaser topic, in order.
    #[instrument(skip(self))]
    pub async fn generate_campaign(&self) -> Vec<ContentPiece> {
        let mut campaign = Vec::with_capacity(CAMPAIGN_TOPICS.len());
        for topic in CAMPAIGN_TOPICS {
            campaign.push(
                self.generate(Theme::StorySaturday, Some(topic), ContentKind::Carousel)
                    .await,
            );
        }
        info!(count = campaign.len(), "Generated teaser campaign");
        campaign
    }
}

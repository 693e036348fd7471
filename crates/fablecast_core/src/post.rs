//! Scheduled posts and publication results.

use crate::{ContentPiece, EngagementEstimate};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Lifecycle of a scheduled post.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostStatus {
    /// Waiting for its posting time
    Scheduled,
    /// Published on the platform
    Posted,
    /// Publication failed
    Failed,
}

/// Outcome of a successful publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PublishedPost {
    /// Platform post identifier
    post_id: String,
    /// Public URL of the post
    post_url: String,
    /// When the publish call completed
    published_at: DateTime<Utc>,
}

impl PublishedPost {
    /// Create a publication record.
    pub fn new(
        post_id: impl Into<String>,
        post_url: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            post_url: post_url.into(),
            published_at,
        }
    }
}

/// A content piece with its posting time, status and engagement estimate.
///
/// Created by the scheduler in [`PostStatus::Scheduled`]; only the publisher
/// moves it to `Posted` or `Failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ScheduledPost {
    /// The piece to publish
    content: ContentPiece,
    /// When the piece should go out
    scheduled_time: DateTime<Utc>,
    /// Current lifecycle state
    status: PostStatus,
    /// Advisory engagement prediction
    estimated_engagement: EngagementEstimate,
    /// Publication record once posted
    published: Option<PublishedPost>,
    /// Failure text once failed
    failure: Option<String>,
}

impl ScheduledPost {
    /// Wrap a piece in the `scheduled` state.
    pub fn new(
        content: ContentPiece,
        scheduled_time: DateTime<Utc>,
        estimated_engagement: EngagementEstimate,
    ) -> Self {
        Self {
            content,
            scheduled_time,
            status: PostStatus::Scheduled,
            estimated_engagement,
            published: None,
            failure: None,
        }
    }

    /// Record a successful publication.
    pub fn mark_posted(&mut self, published: PublishedPost) {
        self.status = PostStatus::Posted;
        self.published = Some(published);
        self.failure = None;
    }

    /// Record a failed publication.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = PostStatus::Failed;
        self.failure = Some(reason.into());
    }
}

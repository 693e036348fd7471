//! Content kinds.

use serde::{Deserialize, Serialize};

/// Format of a content piece.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    /// Multi-image swipeable post
    Carousel,
    /// Short-form video (reel)
    Video,
    /// Single-frame ephemeral story
    Story,
}

impl ContentKind {
    /// Number of slide texts (carousel slides, video script sections, story frames).
    ///
    /// # Examples
    ///
    /// ```
    /// use fablecast_core::ContentKind;
    ///
    /// assert_eq!(ContentKind::Carousel.slide_count(), 5);
    /// assert_eq!(ContentKind::Video.slide_count(), 4);
    /// ```
    pub fn slide_count(self) -> usize {
        match self {
            ContentKind::Carousel => 5,
            ContentKind::Video => 4,
            ContentKind::Story => 1,
        }
    }
}

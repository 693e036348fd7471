//! Generated content pieces.

use crate::{ContentKind, Theme};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Platform ceiling on hashtags per post.
pub const MAX_HASHTAGS: usize = 25;

/// One generated unit of output, immutable once built.
///
/// The builder enforces the piece invariants: the title is not blank, the
/// number of slide texts matches [`ContentKind::slide_count`] and there are at
/// most [`MAX_HASHTAGS`] hashtags. Deserialization goes through the builder, so
/// pieces read from JSON are held to the same rules.
///
/// # Examples
///
/// ```
/// use fablecast_core::{ContentKind, ContentPieceBuilder, Theme};
///
/// let piece = ContentPieceBuilder::default()
///     .theme(Theme::WonderWednesday)
///     .kind(ContentKind::Video)
///     .title("Why do kids ask why?")
///     .slides(vec![
///         "Hook".to_string(),
///         "Setup".to_string(),
///         "Lesson".to_string(),
///         "CTA".to_string(),
///     ])
///     .caption("Curiosity is a superpower.")
///     .psychology_concept("cognitive development")
///     .motif("owl wisdom")
///     .target_age("3-10")
///     .build()
///     .unwrap();
///
/// assert_eq!(piece.slides().len(), 4);
///
/// let too_short = ContentPieceBuilder::default()
///     .theme(Theme::WonderWednesday)
///     .kind(ContentKind::Carousel)
///     .title("Only one slide")
///     .slides(vec!["Hook".to_string()])
///     .caption("")
///     .psychology_concept("growth mindset")
///     .motif("dragon courage")
///     .target_age("3-10")
///     .build();
/// assert!(too_short.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[serde(try_from = "RawPiece")]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ContentPiece {
    /// Day theme the piece belongs to
    theme: Theme,
    /// Format of the piece
    kind: ContentKind,
    /// Headline
    title: String,
    /// Ordered slide texts or script sections
    slides: Vec<String>,
    /// Post caption
    caption: String,
    /// Ordered hashtags, base tags first
    #[builder(default)]
    hashtags: Vec<String>,
    /// Ordered image or scene prompts
    #[builder(default)]
    visual_prompts: Vec<String>,
    /// Child-psychology concept the piece teaches
    psychology_concept: String,
    /// Thematic decorative element
    motif: String,
    /// Target child age range
    target_age: String,
    /// Attention hooks extracted from the content
    #[builder(default)]
    engagement_hooks: Vec<String>,
    /// When the piece was created
    #[builder(default = "Utc::now()")]
    created_at: DateTime<Utc>,
}

impl ContentPieceBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("title must not be blank".to_string());
            }
        }
        if let (Some(kind), Some(slides)) = (&self.kind, &self.slides) {
            if slides.len() != kind.slide_count() {
                return Err(format!(
                    "{} requires {} slides, got {}",
                    kind,
                    kind.slide_count(),
                    slides.len()
                ));
            }
        }
        if let Some(hashtags) = &self.hashtags {
            if hashtags.len() > MAX_HASHTAGS {
                return Err(format!(
                    "at most {} hashtags allowed, got {}",
                    MAX_HASHTAGS,
                    hashtags.len()
                ));
            }
        }
        Ok(())
    }
}

/// Wire shape of a piece before the invariants are checked.
#[derive(Deserialize)]
struct RawPiece {
    theme: Theme,
    kind: ContentKind,
    title: String,
    slides: Vec<String>,
    caption: String,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(default)]
    visual_prompts: Vec<String>,
    psychology_concept: String,
    motif: String,
    target_age: String,
    #[serde(default)]
    engagement_hooks: Vec<String>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TryFrom<RawPiece> for ContentPiece {
    type Error = ContentPieceBuilderError;

    fn try_from(raw: RawPiece) -> Result<Self, Self::Error> {
        ContentPieceBuilder::default()
            .theme(raw.theme)
            .kind(raw.kind)
            .title(raw.title)
            .slides(raw.slides)
            .caption(raw.caption)
            .hashtags(raw.hashtags)
            .visual_prompts(raw.visual_prompts)
            .psychology_concept(raw.psychology_concept)
            .motif(raw.motif)
            .target_age(raw.target_age)
            .engagement_hooks(raw.engagement_hooks)
            .created_at(raw.created_at)
            .build()
    }
}

impl ContentPiece {
    /// Caption followed by a blank line and the space-joined hashtags.
    pub fn caption_with_hashtags(&self) -> String {
        format!("{}\n\n{}", self.caption, self.hashtags.join(" "))
    }
}

/// Loose set of piece fields, conformed into a [`ContentPiece`] without failing.
///
/// Used for template content whose shape is fixed ahead of time. Slides are
/// truncated or padded with empty text to the kind's slide count and hashtags
/// are capped at [`MAX_HASHTAGS`].
#[derive(Debug, Clone, PartialEq)]
pub struct PieceDraft {
    /// Day theme
    pub theme: Theme,
    /// Format
    pub kind: ContentKind,
    /// Headline
    pub title: String,
    /// Slide texts
    pub slides: Vec<String>,
    /// Post caption
    pub caption: String,
    /// Hashtags
    pub hashtags: Vec<String>,
    /// Image or scene prompts
    pub visual_prompts: Vec<String>,
    /// Child-psychology concept
    pub psychology_concept: String,
    /// Thematic decorative element
    pub motif: String,
    /// Target child age range
    pub target_age: String,
    /// Attention hooks
    pub engagement_hooks: Vec<String>,
}

impl PieceDraft {
    /// Produce a piece that satisfies every [`ContentPiece`] invariant.
    pub fn conform(self) -> ContentPiece {
        let mut slides = self.slides;
        slides.resize(self.kind.slide_count(), String::new());
        let mut hashtags = self.hashtags;
        hashtags.truncate(MAX_HASHTAGS);

        ContentPiece {
            theme: self.theme,
            kind: self.kind,
            title: self.title,
            slides,
            caption: self.caption,
            hashtags,
            visual_prompts: self.visual_prompts,
            psychology_concept: self.psychology_concept,
            motif: self.motif,
            target_age: self.target_age,
            engagement_hooks: self.engagement_hooks,
            created_at: Utc::now(),
        }
    }
}

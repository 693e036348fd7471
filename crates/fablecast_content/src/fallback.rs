//! Template pieces used when generation fails.

use crate::{build_hashtags, fallback_visual_prompts};
use fablecast_core::{ContentKind, ContentPiece, PieceDraft, Theme};

/// Psychology concept recorded on every fallback piece.
pub const FALLBACK_CONCEPT: &str = "general support";

/// Target age recorded on every fallback piece.
pub const FALLBACK_TARGET_AGE: &str = "all";

/// Fixed piece for `kind`, determined entirely by theme and topic.
///
/// # Examples
///
/// ```
/// use fablecast_content::fallback_piece;
/// use fablecast_core::{ContentKind, Theme};
///
/// let piece = fallback_piece(Theme::TinyTalesTuesday, "bedtime struggles", ContentKind::Carousel);
/// assert_eq!(piece.title(), "Quick Tips for bedtime struggles");
/// assert_eq!(piece.slides().len(), 5);
/// assert_eq!(piece.psychology_concept(), "general support");
/// ```
pub fn fallback_piece(theme: Theme, topic: &str, kind: ContentKind) -> ContentPiece {
    let hashtags = build_hashtags(theme, topic, kind);
    let draft = match kind {
        ContentKind::Carousel => PieceDraft {
            theme,
            kind,
            title: format!("Quick Tips for {topic}"),
            slides: vec![
                format!("Struggling with {topic}?"),
                "Take a deep breath, you've got this!".to_string(),
                "Every challenge is a growth opportunity".to_string(),
                "Small steps lead to big changes".to_string(),
                "Share your experience below! 👇".to_string(),
            ],
            caption: format!("Quick thoughts on {topic}. What works for your family?"),
            hashtags,
            visual_prompts: fallback_visual_prompts("gentle encouragement"),
            psychology_concept: FALLBACK_CONCEPT.to_string(),
            motif: "gentle encouragement".to_string(),
            target_age: FALLBACK_TARGET_AGE.to_string(),
            engagement_hooks: vec!["Quick question for you...".to_string()],
        },
        ContentKind::Video => PieceDraft {
            theme,
            kind,
            title: format!("Quick Video: {topic}"),
            slides: vec![
                "Quick tip coming your way!".to_string(),
                format!("When dealing with {topic}..."),
                "Remember: Progress, not perfection".to_string(),
                "What would you add? Comment below!".to_string(),
            ],
            caption: format!("Quick thoughts on {topic}. What's your experience?"),
            hashtags,
            visual_prompts: vec!["Simple talking head with text overlay".to_string()],
            psychology_concept: FALLBACK_CONCEPT.to_string(),
            motif: "encouraging tone".to_string(),
            target_age: FALLBACK_TARGET_AGE.to_string(),
            engagement_hooks: vec!["Quick question...".to_string()],
        },
        ContentKind::Story => PieceDraft {
            theme,
            kind,
            title: format!("Quick Moment: {topic}"),
            slides: vec![format!(
                "Feeling stretched by {topic}? Pause, breathe, and try one small step today."
            )],
            caption: format!("A gentle reminder about {topic}. Share it with a parent who needs it."),
            hashtags,
            visual_prompts: vec![
                "Soft watercolor of a parent and child sharing a quiet moment".to_string(),
            ],
            psychology_concept: FALLBACK_CONCEPT.to_string(),
            motif: "gentle encouragement".to_string(),
            target_age: FALLBACK_TARGET_AGE.to_string(),
            engagement_hooks: vec!["Pause for a moment...".to_string()],
        },
    };
    draft.conform()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BASE_HASHTAGS;
    use strum::IntoEnumIterator;

    #[test]
    fn test_slide_counts_match_kind() {
        for kind in ContentKind::iter() {
            let piece = fallback_piece(Theme::ThoughtfulThursday, "homework battles", kind);
            assert_eq!(piece.slides().len(), kind.slide_count());
            assert_eq!(*piece.kind(), kind);
            assert_eq!(piece.psychology_concept(), FALLBACK_CONCEPT);
            assert_eq!(piece.target_age(), FALLBACK_TARGET_AGE);
        }
    }

    #[test]
    fn test_video_template() {
        let piece = fallback_piece(Theme::FantasyFriday, "sibling rivalry", ContentKind::Video);
        assert_eq!(piece.title(), "Quick Video: sibling rivalry");
        assert_eq!(piece.slides()[1], "When dealing with sibling rivalry...");
        assert_eq!(piece.motif(), "encouraging tone");
    }

    #[test]
    fn test_hashtags_start_with_base_tags() {
        let piece = fallback_piece(Theme::StorySaturday, "family traditions", ContentKind::Carousel);
        assert_eq!(&piece.hashtags()[..9], &BASE_HASHTAGS.map(String::from));
    }

    #[test]
    fn test_same_inputs_same_content() {
        let a = fallback_piece(Theme::SereneSunday, "holiday stress", ContentKind::Story);
        let b = fallback_piece(Theme::SereneSunday, "holiday stress", ContentKind::Story);
        assert_eq!(a.title(), b.title());
        assert_eq!(a.slides(), b.slides());
        assert_eq!(a.caption(), b.caption());
        assert_eq!(a.hashtags(), b.hashtags());
    }
}

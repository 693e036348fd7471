//! Prompt construction.

use crate::TARGET_AGE;
use fablecast_core::{ContentKind, Theme};

/// Everything a primary prompt encodes about the piece being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptContext<'a> {
    /// Day theme
    pub theme: Theme,
    /// Parenting topic
    pub topic: &'a str,
    /// Child-psychology concept
    pub concept: &'a str,
    /// Thematic motif
    pub motif: &'a str,
}

impl PromptContext<'_> {
    /// Primary prompt for the given kind.
    pub fn primary(&self, kind: ContentKind) -> String {
        match kind {
            ContentKind::Carousel => self.carousel(),
            ContentKind::Video => self.video(),
            ContentKind::Story => self.story(),
        }
    }

    fn carousel(&self) -> String {
        format!(
            r#"Create a 5-slide Instagram carousel about "{topic}" for parents.

Theme: {theme}
Psychology Concept: {concept}
Magical Element: {motif}
Target: Parents with children ages {age}

Requirements:
- Slide 1: Hook (question or surprising fact)
- Slides 2-4: Practical tips with magical storytelling
- Slide 5: Call-to-action + teaser for upcoming AI story bot

Tone: Warm, supportive, magical but practical
Each slide should be 1-2 sentences maximum

Return as JSON with: title, slides (array of 5 strings), psychology_explanation, magical_narrative"#,
            topic = self.topic,
            theme = self.theme,
            concept = self.concept,
            motif = self.motif,
            age = TARGET_AGE,
        )
    }

    fn video(&self) -> String {
        format!(
            r#"Create a 60-90 second Instagram video script about "{topic}".

Theme: {theme}
Psychology: {concept}
Magic: {motif}
Target: Parents with children ages {age}

Structure:
- Hook (0-5 seconds): Attention-grabbing question
- Story Setup (5-25 seconds): Magical scenario introduction
- Teaching Moment (25-60 seconds): Psychology tip within story
- Call-to-Action (60-90 seconds): Engagement + bot teaser

Include: scene descriptions, voiceover script, text overlays

Return as JSON with: title, script_sections (array of 4 strings), scene_descriptions, text_overlays, background_music_mood, hook"#,
            topic = self.topic,
            theme = self.theme,
            concept = self.concept,
            motif = self.motif,
            age = TARGET_AGE,
        )
    }

    fn story(&self) -> String {
        format!(
            r#"Create a single-frame Instagram story about "{topic}" for parents.

Theme: {theme}
Psychology Concept: {concept}
Magical Element: {motif}
Target: Parents with children ages {age}

Requirements:
- One short, warm line a parent can act on today
- Hint at the upcoming AI story bot

Return as JSON with: title, frame, visual_prompt"#,
            topic = self.topic,
            theme = self.theme,
            concept = self.concept,
            motif = self.motif,
            age = TARGET_AGE,
        )
    }

    /// Caption prompt for a piece with the given headline.
    pub fn caption(&self, kind: ContentKind, title: &str) -> String {
        match kind {
            ContentKind::Carousel => format!(
                r#"Write an Instagram caption for a carousel about "{topic}".

Content Summary: {title}
Theme: {theme}

Requirements:
- Start with hook/question
- Include story element from carousel
- Add psychology tip
- End with CTA about upcoming AI story bot
- Warm, supportive tone
- 150-200 words
- Include emoji sparingly

Return just the caption text."#,
                topic = self.topic,
                theme = self.theme,
            ),
            ContentKind::Video => format!(
                r#"Write an Instagram video caption for "{topic}".

Video Summary: {title}

Requirements:
- Start with hook that matches video opening
- Mention the magical story element
- Include the psychology tip
- Encourage interaction (comments/shares)
- Tease upcoming AI storytelling bot
- 100-150 words
- Video-optimized format

Return just the caption text."#,
                topic = self.topic,
            ),
            ContentKind::Story => format!(
                r#"Write a one-sentence Instagram story caption for "{topic}".

Story Summary: {title}

Mention the upcoming AI story bot. Return just the caption text."#,
                topic = self.topic,
            ),
        }
    }
}

/// Prompt for one illustration description per slide.
pub fn visual_prompts(title: &str, motif: &str, count: usize) -> String {
    format!(
        r#"Create {count} Midjourney prompts for an Instagram carousel about "{title}".

Style: Whimsical children's book illustration, soft pastels, magical realism
Elements: {motif}

Each prompt should be optimized for Instagram carousel (1080x1080px equivalent)
Include: magical creatures, parent-child interactions, cozy settings

Return as JSON array of prompts."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PromptContext<'static> {
        PromptContext {
            theme: Theme::FantasyFriday,
            topic: "picky eating",
            concept: "growth mindset",
            motif: "dragon courage",
        }
    }

    #[test]
    fn test_primary_prompt_encodes_selection() {
        let prompt = context().primary(ContentKind::Carousel);
        assert!(prompt.contains("\"picky eating\""));
        assert!(prompt.contains("Theme: fantasy_friday"));
        assert!(prompt.contains("Psychology Concept: growth mindset"));
        assert!(prompt.contains("Magical Element: dragon courage"));
        assert!(prompt.contains("ages 3-10"));
        assert!(prompt.contains("slides (array of 5 strings)"));
    }

    #[test]
    fn test_video_prompt_asks_for_four_sections() {
        let prompt = context().primary(ContentKind::Video);
        assert!(prompt.contains("script_sections (array of 4 strings)"));
        assert!(prompt.contains("Call-to-Action"));
    }

    #[test]
    fn test_caption_word_ranges_by_kind() {
        let ctx = context();
        assert!(ctx.caption(ContentKind::Carousel, "t").contains("150-200 words"));
        assert!(ctx.caption(ContentKind::Video, "t").contains("100-150 words"));
        assert!(ctx.caption(ContentKind::Story, "t").contains("AI story bot"));
    }
}

//! Themed content generation.
//!
//! [`ContentGenerator`] turns a theme, an optional topic and a content kind into
//! a [`ContentPiece`](fablecast_core::ContentPiece) by prompting a
//! [`GenerativeBackend`](fablecast_models::GenerativeBackend). Generation never
//! fails outward: the fallible path returns a
//! [`GenerationResult`](fablecast_error::GenerationResult) and a separate step
//! swaps in the fixed template for that kind when it errs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod banks;
mod batch;
mod extraction;
mod fallback;
mod generator;
mod hashtags;
mod payload;
mod prompt;

pub use banks::{
    CAMPAIGN_TOPICS, MOTIFS, PSYCHOLOGY_CONCEPTS, SYSTEM_INSTRUCTION, TARGET_AGE, TOPICS,
    fallback_visual_prompts,
};
pub use batch::DailyContent;
pub use extraction::{extract_json, parse_json};
pub use fallback::{FALLBACK_CONCEPT, FALLBACK_TARGET_AGE, fallback_piece};
pub use generator::{ContentGenerator, Selection};
pub use hashtags::{BASE_HASHTAGS, VIDEO_HASHTAGS, build_hashtags, topic_hashtags};
pub use payload::{CarouselPayload, StoryPayload, VideoPayload, VisualPromptsPayload};
pub use prompt::PromptContext;

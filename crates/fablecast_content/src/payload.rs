//! Shapes the backend is asked to return.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primary payload for a carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CarouselPayload {
    /// Headline
    title: String,
    /// Slide texts, hook first and call to action last
    slides: Vec<String>,
    /// Why the advice works
    #[serde(default)]
    psychology_explanation: Option<String>,
    /// Story framing around the tips
    #[serde(default)]
    magical_narrative: Option<String>,
}

/// Primary payload for a short video script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct VideoPayload {
    /// Headline
    title: String,
    /// Hook, setup, teaching moment and call to action
    #[serde(deserialize_with = "text_items")]
    script_sections: Vec<String>,
    /// Scene descriptions for the visuals
    #[serde(default, deserialize_with = "text_items")]
    scene_descriptions: Vec<String>,
    /// On-screen text
    #[serde(default, deserialize_with = "text_items")]
    text_overlays: Vec<String>,
    /// Suggested soundtrack mood
    #[serde(default)]
    background_music_mood: Option<String>,
    /// Opening line
    #[serde(default)]
    hook: Option<String>,
}

/// Primary payload for a single-frame story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct StoryPayload {
    /// Headline
    title: String,
    /// Text shown on the frame
    frame: String,
    /// Illustration for the frame
    #[serde(default)]
    visual_prompt: Option<String>,
}

/// Visual prompt list, either bare or wrapped in `{"prompts": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualPromptsPayload {
    /// `{"prompts": [...]}`
    Wrapped {
        /// Prompts in slide order
        prompts: Vec<String>,
    },
    /// `[...]`
    Bare(Vec<String>),
}

impl VisualPromptsPayload {
    /// Prompts in slide order.
    pub fn into_prompts(self) -> Vec<String> {
        match self {
            VisualPromptsPayload::Wrapped { prompts } => prompts,
            VisualPromptsPayload::Bare(prompts) => prompts,
        }
    }
}

/// Accept a list of strings, or of objects whose string fields are joined.
///
/// Script sections often come back as `{"section": "Hook", "voiceover": "..."}`.
fn text_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items.into_iter().map(flatten_text).collect())
}

fn flatten_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(_, v)| match v {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

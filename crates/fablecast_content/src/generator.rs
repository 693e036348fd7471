//! Content generation with explicit fallback selection.

use crate::prompt::{self, PromptContext};
use crate::{
    CarouselPayload, MOTIFS, PSYCHOLOGY_CONCEPTS, SYSTEM_INSTRUCTION, StoryPayload, TARGET_AGE,
    TOPICS, VideoPayload, VisualPromptsPayload, build_hashtags, fallback_piece,
    fallback_visual_prompts, parse_json,
};
use fablecast_core::{ContentKind, ContentPiece, ContentPieceBuilder, Theme};
use fablecast_error::{GenerationError, GenerationErrorKind, GenerationResult};
use fablecast_models::{
    CompletionRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerativeBackend,
};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

/// Topic, concept and motif chosen for one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Parenting topic
    pub topic: String,
    /// Child-psychology concept
    pub concept: String,
    /// Thematic motif
    pub motif: String,
}

impl Selection {
    /// Draw concept and motif uniformly, and the topic too when none is given.
    pub fn draw<R: Rng + ?Sized>(topic: Option<&str>, rng: &mut R) -> Self {
        let topic = match topic {
            Some(topic) => topic.to_string(),
            None => pick(&TOPICS, rng).to_string(),
        };
        Self {
            topic,
            concept: pick(&PSYCHOLOGY_CONCEPTS, rng).to_string(),
            motif: pick(&MOTIFS, rng).to_string(),
        }
    }

    fn context(&self, theme: Theme) -> PromptContext<'_> {
        PromptContext {
            theme,
            topic: &self.topic,
            concept: &self.concept,
            motif: &self.motif,
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(bank: &[&'a str], rng: &mut R) -> &'a str {
    bank.choose(rng).copied().unwrap_or_default()
}

fn ensure_slide_count(kind: ContentKind, count: usize) -> GenerationResult<()> {
    if count == kind.slide_count() {
        Ok(())
    } else {
        Err(GenerationError::new(GenerationErrorKind::InvalidContent(
            format!("{} requires {} slides, got {}", kind, kind.slide_count(), count),
        )))
    }
}

/// Generates content pieces from a backend, substituting templates on failure.
///
/// # Examples
///
/// ```rust,no_run
/// use fablecast_content::ContentGenerator;
/// use fablecast_core::{ContentKind, Theme};
/// use fablecast_models::OpenAiClient;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = ContentGenerator::new(OpenAiClient::from_env("gpt-4o-mini")?);
/// let piece = generator
///     .generate(Theme::MagicalMonday, Some("bedtime struggles"), ContentKind::Carousel)
///     .await;
/// assert_eq!(piece.slides().len(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ContentGenerator<B> {
    backend: B,
    temperature: f32,
    max_tokens: u32,
}

impl<B: GenerativeBackend> ContentGenerator<B> {
    /// Create a generator with default sampling parameters.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override sampling parameters for every request.
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate a piece, never failing.
    ///
    /// Without a topic one is drawn from [`TOPICS`](crate::TOPICS). Any backend
    /// or parsing failure yields [`fallback_piece`] for the same theme, topic
    /// and kind.
    pub async fn generate(
        &self,
        theme: Theme,
        topic: Option<&str>,
        kind: ContentKind,
    ) -> ContentPiece {
        let selection = Selection::draw(topic, &mut rand::thread_rng());
        self.generate_selected(theme, &selection, kind).await
    }

    /// Generate a piece from a pre-drawn selection, never failing.
    #[instrument(skip_all, fields(theme = %theme, kind = %kind, topic = %selection.topic))]
    pub async fn generate_selected(
        &self,
        theme: Theme,
        selection: &Selection,
        kind: ContentKind,
    ) -> ContentPiece {
        match self.try_generate(theme, selection, kind).await {
            Ok(piece) => {
                info!(title = %piece.title(), "Generated content piece");
                piece
            }
            Err(e) => {
                warn!(error = %e, "Generation failed, using fallback content");
                fallback_piece(theme, &selection.topic, kind)
            }
        }
    }

    /// Generate a piece, surfacing the first failing step.
    pub async fn try_generate(
        &self,
        theme: Theme,
        selection: &Selection,
        kind: ContentKind,
    ) -> GenerationResult<ContentPiece> {
        let context = selection.context(theme);
        let response = self.complete(context.primary(kind)).await?;

        let mut builder = ContentPieceBuilder::default();
        builder
            .theme(theme)
            .kind(kind)
            .psychology_concept(selection.concept.clone())
            .motif(selection.motif.clone())
            .target_age(TARGET_AGE)
            .hashtags(build_hashtags(theme, &selection.topic, kind));

        let title = match kind {
            ContentKind::Carousel => {
                let payload: CarouselPayload = parse_json(&response)?;
                ensure_slide_count(kind, payload.slides().len())?;
                let visuals = self
                    .visual_prompts(payload.title(), &selection.motif, payload.slides().len())
                    .await;
                let hooks: Vec<String> = payload.slides().first().cloned().into_iter().collect();
                builder
                    .engagement_hooks(hooks)
                    .visual_prompts(visuals)
                    .slides(payload.slides().clone());
                payload.title().clone()
            }
            ContentKind::Video => {
                let payload: VideoPayload = parse_json(&response)?;
                ensure_slide_count(kind, payload.script_sections().len())?;
                let visuals = if payload.scene_descriptions().is_empty() {
                    fallback_visual_prompts(&selection.motif)
                } else {
                    payload.scene_descriptions().clone()
                };
                let hook = payload
                    .hook()
                    .clone()
                    .filter(|hook| !hook.trim().is_empty())
                    .or_else(|| payload.script_sections().first().cloned());
                let hooks: Vec<String> = hook.into_iter().collect();
                builder
                    .engagement_hooks(hooks)
                    .visual_prompts(visuals)
                    .slides(payload.script_sections().clone());
                payload.title().clone()
            }
            ContentKind::Story => {
                let payload: StoryPayload = parse_json(&response)?;
                let visual = payload
                    .visual_prompt()
                    .clone()
                    .filter(|prompt| !prompt.trim().is_empty())
                    .or_else(|| {
                        fallback_visual_prompts(&selection.motif)
                            .into_iter()
                            .next()
                    })
                    .unwrap_or_default();
                builder
                    .engagement_hooks(vec![payload.frame().clone()])
                    .visual_prompts(vec![visual])
                    .slides(vec![payload.frame().clone()]);
                payload.title().clone()
            }
        };

        let caption = self.complete(context.caption(kind, &title)).await?;

        builder
            .title(title)
            .caption(caption.trim().to_string())
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::InvalidContent(e.to_string())))
    }

    /// One illustration prompt per slide, or the motif-keyed defaults on failure.
    async fn visual_prompts(&self, title: &str, motif: &str, count: usize) -> Vec<String> {
        match self.try_visual_prompts(title, motif, count).await {
            Ok(prompts) => prompts,
            Err(e) => {
                debug!(error = %e, "Using default visual prompts");
                fallback_visual_prompts(motif)
            }
        }
    }

    async fn try_visual_prompts(
        &self,
        title: &str,
        motif: &str,
        count: usize,
    ) -> GenerationResult<Vec<String>> {
        let response = self
            .complete(prompt::visual_prompts(title, motif, count))
            .await?;
        let prompts = parse_json::<VisualPromptsPayload>(&response)?.into_prompts();
        if prompts.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::InvalidContent(
                "no visual prompts returned".to_string(),
            )));
        }
        Ok(prompts)
    }

    async fn complete(&self, prompt: String) -> GenerationResult<String> {
        let request = CompletionRequest::new(SYSTEM_INSTRUCTION, prompt)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        self.backend.complete(&request).await
    }
}

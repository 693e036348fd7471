//! OpenAI-compatible chat-completions client.

use crate::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, CompletionRequest,
    GenerativeBackend,
};
use async_trait::async_trait;
use fablecast_error::{ConfigError, GenerationError, GenerationErrorKind, GenerationResult};
use fablecast_rate_limit::BackendThrottle;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: usize = 2;
const DEFAULT_RETRY_BASE_MS: u64 = 500;
const MAX_RETRY_DELAY_SECS: u64 = 10;

/// Chat-completions client.
///
/// Each call waits on the optional per-minute throttle, then sends the request.
/// Transport failures and 408/429/5xx answers are retried with jittered
/// exponential backoff; anything else fails immediately.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    throttle: Option<BackendThrottle>,
    max_retries: usize,
    retry_base_ms: u64,
}

impl OpenAiClient {
    /// Create a client reading the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the variable is unset.
    #[instrument(skip_all)]
    pub fn from_env(model: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|e| ConfigError::new(format!("OPENAI_API_KEY not set: {}", e)))?;
        Self::with_api_key(api_key, model)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the key is empty or the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn with_api_key(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::new("OpenAI API key is empty"));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            throttle: None,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_ms: DEFAULT_RETRY_BASE_MS,
        })
    }

    /// Point the client at another OpenAI-compatible root, e.g. `http://localhost:8080/v1`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Throttle outbound requests.
    pub fn with_throttle(mut self, throttle: BackendThrottle) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Configure transient retries. `max_retries = 0` sends each request once.
    pub fn with_retry(mut self, max_retries: usize, base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_base_ms = base_ms.max(1);
        self
    }

    /// API root in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn body(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::new(ChatRole::System, request.system().clone()),
                ChatMessage::new(ChatRole::User, request.prompt().clone()),
            ],
            *request.temperature(),
            *request.max_tokens(),
        )
    }

    /// Send one request without retrying.
    async fn send_once(&self, body: &ChatCompletionRequest) -> GenerationResult<String> {
        if let Some(throttle) = &self.throttle {
            throttle.until_ready().await;
        }

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Http(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Parse(e.to_string())))?;

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiClient {
    #[instrument(
        skip(self, request),
        fields(model = %self.model, prompt_len = request.prompt().len())
    )]
    async fn complete(&self, request: &CompletionRequest) -> GenerationResult<String> {
        let body = self.body(request);
        let body = &body;

        let strategy = ExponentialBackoff::from_millis(self.retry_base_ms)
            .factor(2)
            .max_delay(Duration::from_secs(MAX_RETRY_DELAY_SECS))
            .map(jitter)
            .take(self.max_retries);

        let text = Retry::spawn(strategy, || async move {
            match self.send_once(body).await {
                Ok(text) => Ok(text),
                Err(e) if e.kind().is_transient() => {
                    warn!(error = %e, "Transient backend failure, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent backend failure");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await?;

        debug!(response_len = text.len(), "Completion received");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

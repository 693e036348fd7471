//! Provider-neutral completion request.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion budget in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 1500;

/// A role-tagged instruction plus a prompt, with sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CompletionRequest {
    /// System instruction framing the model's role
    system: String,
    /// User prompt
    prompt: String,
    /// Sampling temperature
    temperature: f32,
    /// Maximum tokens to generate
    max_tokens: u32,
}

impl CompletionRequest {
    /// Create a request with default sampling parameters.
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

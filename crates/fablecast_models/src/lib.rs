//! Generative backend integrations.
//!
//! The content pipeline talks to a text model through the [`GenerativeBackend`]
//! trait. [`OpenAiClient`] implements it against any OpenAI-compatible
//! chat-completions endpoint, throttled per minute and retrying transient
//! HTTP failures before giving up.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod dto;
mod openai;
mod request;

pub use backend::GenerativeBackend;
pub use dto::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole};
pub use openai::{DEFAULT_BASE_URL, OpenAiClient};
pub use request::{CompletionRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

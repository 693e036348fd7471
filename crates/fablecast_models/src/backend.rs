//! Backend abstraction.

use crate::CompletionRequest;
use async_trait::async_trait;
use fablecast_error::GenerationResult;
use std::sync::Arc;

/// A text model that answers one prompt per call.
///
/// Implementations return the raw completion text. Callers are responsible for
/// locating and parsing any structured payload inside it.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run a single completion.
    async fn complete(&self, request: &CompletionRequest) -> GenerationResult<String>;

    /// Model identifier sent with each request.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<B: GenerativeBackend + ?Sized> GenerativeBackend for Arc<B> {
    async fn complete(&self, request: &CompletionRequest) -> GenerationResult<String> {
        (**self).complete(request).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

use std::sync::Arc;

use crate::request::GenerateRequest;
use crate::response::Response;

/// A concrete, type-erased language model handle.
///
/// Handles are cheap to clone and cheap to construct repeatedly; the backend
/// behind them is shared, never copied. Decorators wrap a handle and forward
/// [`model_id()`](LanguageModel::model_id) and
/// [`provider()`](LanguageModel::provider) unchanged, so identity stays
/// observable however deep the wrapping goes.
#[derive(Clone)]
pub struct LanguageModel {
    inner: Arc<dyn LanguageModelBackend>,
}

impl LanguageModel {
    /// Wrap a backend implementation into a handle.
    pub fn new(backend: impl LanguageModelBackend + 'static) -> Self {
        Self {
            inner: Arc::new(backend),
        }
    }

    /// The model identifier (e.g. `"deepseek-chat"`).
    pub fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    /// The id of the provider this model belongs to (e.g. `"deepseek"`).
    pub fn provider(&self) -> &str {
        self.inner.provider()
    }

    /// Start a streaming generation.
    pub fn generate(&self, request: impl Into<GenerateRequest>) -> Response {
        self.inner.generate(request.into())
    }
}

impl std::fmt::Debug for LanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageModel")
            .field("provider", &self.provider())
            .field("model_id", &self.model_id())
            .finish()
    }
}

/// Trait implemented by provider crates for a specific model.
pub trait LanguageModelBackend: Send + Sync {
    fn model_id(&self) -> &str;
    fn provider(&self) -> &str;
    fn generate(&self, request: GenerateRequest) -> Response;
}

use crate::model::LanguageModel;

/// A concrete, type-erased language model provider.
///
/// A provider is a configured connection to one inference endpoint; asking it
/// for a model id yields a [`LanguageModel`] bound to that endpoint.
pub struct LanguageModelProvider {
    inner: Box<dyn LanguageModelProviderBackend>,
}

impl LanguageModelProvider {
    /// Wrap a backend implementation into a provider.
    pub fn new(backend: impl LanguageModelProviderBackend + 'static) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    /// The provider id (e.g. `"deepseek"`, `"openai"`).
    pub fn id(&self) -> &str {
        self.inner.id()
    }

    /// Create a model handle for the given model id.
    ///
    /// This performs no I/O and does not verify that the endpoint actually
    /// serves the id; invocation failures surface through the handle.
    pub fn model(&self, model_id: &str) -> LanguageModel {
        self.inner.model(model_id)
    }
}

impl std::fmt::Debug for LanguageModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageModelProvider")
            .field("id", &self.id())
            .finish()
    }
}

/// Trait that provider crates implement.
pub trait LanguageModelProviderBackend: Send + Sync {
    fn id(&self) -> &str;
    fn model(&self, model_id: &str) -> LanguageModel;
}

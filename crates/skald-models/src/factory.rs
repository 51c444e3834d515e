use std::sync::Arc;

use parking_lot::Mutex;
use skald_llm::{LanguageModel, ModelMiddleware, TraceMiddleware, apply_middleware};
use skald_llm_registry::{Error, Registry};

/// Factory for middleware-decorated model handles.
///
/// The factory serves one pinned model. Construction is eager about
/// credentials: [`from_env`](ModelFactory::from_env) resolves and validates
/// them immediately, so a misconfigured process fails at boot rather than on
/// first use.
pub struct ModelFactory {
    /// Guarded because the registry mutates its instance cache on first use;
    /// `create_model` itself holds the lock only for the lookup.
    registry: Mutex<Registry>,
    middleware: Vec<Arc<dyn ModelMiddleware>>,
    default_provider: String,
    default_model: String,
}

impl ModelFactory {
    /// The shipped wiring: DeepSeek, constructed eagerly from the
    /// environment, with the stock middleware chain.
    ///
    /// Fails when no credential env var is set (see
    /// [`skald_llm_deepseek::API_KEY_ENV_VARS`]) or the key is empty.
    pub fn from_env() -> Result<Self, Error> {
        let mut registry = Registry::new();
        skald_llm_deepseek::register(&mut registry);
        registry.ensure_provider(skald_llm_deepseek::PROVIDER_ID)?;

        Ok(Self::new(
            registry,
            skald_llm_deepseek::PROVIDER_ID,
            skald_llm_deepseek::DEFAULT_MODEL_ID,
        )
        .with_middleware(TraceMiddleware))
    }

    /// Build a factory over an explicit registry, pinned to
    /// `default_provider:default_model`. No middleware is installed.
    pub fn new(
        registry: Registry,
        default_provider: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            registry: Mutex::new(registry),
            middleware: Vec::new(),
            default_provider: default_provider.into(),
            default_model: default_model.into(),
        }
    }

    /// Append a middleware applied uniformly to every created handle,
    /// in registration order.
    pub fn with_middleware(mut self, middleware: impl ModelMiddleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// The `provider:model` specifier every handle is bound to.
    pub fn pinned_model(&self) -> String {
        format!("{}:{}", self.default_provider, self.default_model)
    }

    /// Create a decorated model handle.
    ///
    /// The `api_identifier` names what the caller asked for; it is logged but
    /// does not select the model. Every handle is bound to the factory's
    /// pinned default.
    pub fn create_model(&self, api_identifier: &str) -> Result<LanguageModel, Error> {
        tracing::debug!(
            requested = api_identifier,
            serving = %self.pinned_model(),
            "creating model handle"
        );

        let model = self
            .registry
            .lock()
            .model(&self.default_provider, &self.default_model)?;
        Ok(apply_middleware(model, self.middleware.clone()))
    }
}

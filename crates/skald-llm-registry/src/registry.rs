//! The core registry: maps provider ids to factories and resolves models.

use std::collections::HashMap;

use skald_llm::LanguageModel;
use skald_llm::LanguageModelProvider;

use crate::catalog::ModelSpec;
use crate::error::Error;
use crate::factory::{ProviderFactory, ProviderOptions};
use crate::provider::ProviderRegistration;

/// A provider that is currently usable (its credential is present).
#[derive(Debug, Clone)]
pub struct AvailableProvider {
    /// Provider id (e.g. `"deepseek"`).
    pub id: String,
    /// Human-friendly display name (e.g. `"DeepSeek"`).
    pub name: String,
}

struct ProviderEntry {
    registration: ProviderRegistration,
    factory: Box<dyn ProviderFactory>,
    /// Lazily constructed instance. One per provider id for the life of the
    /// registry.
    instance: Option<LanguageModelProvider>,
}

/// Central registry that maps provider ids to factories and hands out model
/// handles.
///
/// Providers are constructed on first use (or explicitly via
/// [`ensure_provider`](Registry::ensure_provider)), with their credential
/// resolved from the environment at construction time. Construction happens at
/// most once per id; the instance is cached for the registry's lifetime.
pub struct Registry {
    providers: HashMap<String, ProviderEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider.
    pub fn add_provider(
        &mut self,
        registration: ProviderRegistration,
        factory: impl ProviderFactory + 'static,
    ) {
        self.providers.insert(
            registration.id.clone(),
            ProviderEntry {
                registration,
                factory: Box::new(factory),
                instance: None,
            },
        );
    }

    /// Check whether a provider id is registered.
    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers.contains_key(provider)
    }

    /// The registration for a provider id, if registered.
    pub fn registration(&self, provider: &str) -> Option<&ProviderRegistration> {
        self.providers.get(provider).map(|entry| &entry.registration)
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Construct the provider now if it has not been constructed yet.
    ///
    /// Call this from the application's startup path to surface a missing
    /// credential at boot instead of on first model use.
    pub fn ensure_provider(&mut self, provider: &str) -> Result<(), Error> {
        let entry = self
            .providers
            .get_mut(provider)
            .ok_or_else(|| Error::ProviderNotFound(provider.to_string()))?;
        if entry.instance.is_some() {
            return Ok(());
        }

        let options = resolve_options(&entry.registration)?;
        tracing::debug!(
            provider = %entry.registration.id,
            endpoint = ?options.api_endpoint,
            "constructing provider"
        );
        entry.instance = Some(entry.factory.create(options)?);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Model resolution
    // -----------------------------------------------------------------------

    /// Obtain a [`LanguageModel`] for the given provider and model id.
    ///
    /// Constructs the provider lazily on first use. When the registration
    /// declares a catalog, the model id must be in it.
    pub fn model(&mut self, provider: &str, model_id: &str) -> Result<LanguageModel, Error> {
        let entry = self
            .providers
            .get(provider)
            .ok_or_else(|| Error::ProviderNotFound(provider.to_string()))?;
        if !entry.registration.models.is_empty()
            && !entry.registration.models.iter().any(|m| m.id == model_id)
        {
            return Err(Error::ModelNotFound {
                provider: provider.to_string(),
                model: model_id.to_string(),
            });
        }

        self.ensure_provider(provider)?;
        Ok(self.providers[provider].instance.as_ref().unwrap().model(model_id))
    }

    /// Parse a combined `"provider:model"` specifier and return the model.
    pub fn model_from_string(&mut self, specifier: &str) -> Result<LanguageModel, Error> {
        let (provider, model_id) = specifier
            .split_once(':')
            .ok_or_else(|| Error::InvalidSpecifier(specifier.to_string()))?;
        self.model(provider, model_id)
    }

    // -----------------------------------------------------------------------
    // Catalog queries
    // -----------------------------------------------------------------------

    /// List the declared models for a provider.
    pub fn list_models(&self, provider: &str) -> Vec<ModelSpec> {
        self.providers
            .get(provider)
            .map(|entry| entry.registration.models.clone())
            .unwrap_or_default()
    }

    /// Get a specific model's catalog metadata.
    pub fn model_spec(&self, provider: &str, model_id: &str) -> Option<ModelSpec> {
        self.providers
            .get(provider)?
            .registration
            .models
            .iter()
            .find(|m| m.id == model_id)
            .cloned()
    }

    // -----------------------------------------------------------------------
    // Availability
    // -----------------------------------------------------------------------

    /// Providers whose credential is currently present in the environment.
    /// Registrations without env candidates are always available.
    pub fn available_providers(&self) -> Vec<AvailableProvider> {
        let mut result: Vec<AvailableProvider> = self
            .providers
            .values()
            .filter(|entry| {
                entry.registration.env.is_empty()
                    || entry
                        .registration
                        .env
                        .iter()
                        .any(|var| std::env::var(var).is_ok())
            })
            .map(|entry| AvailableProvider {
                id: entry.registration.id.clone(),
                name: entry.registration.name.clone(),
            })
            .collect();

        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build [`ProviderOptions`] from a registration and the process environment.
fn resolve_options(registration: &ProviderRegistration) -> Result<ProviderOptions, Error> {
    let api_key = if registration.env.is_empty() {
        None
    } else {
        Some(
            registration
                .env
                .iter()
                .find_map(|var| std::env::var(var).ok())
                .ok_or_else(|| Error::MissingEnvVar(registration.env.join(", ")))?,
        )
    };

    Ok(ProviderOptions {
        id: registration.id.clone(),
        api_key,
        api_endpoint: registration.api_endpoint.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skald_llm::request::GenerateRequest;
    use skald_llm::{
        LanguageModelBackend, LanguageModelProviderBackend, Response, StreamEvent,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedBackend {
        provider_id: String,
        model_id: String,
    }

    impl LanguageModelBackend for FixedBackend {
        fn model_id(&self) -> &str {
            &self.model_id
        }

        fn provider(&self) -> &str {
            &self.provider_id
        }

        fn generate(&self, _request: GenerateRequest) -> Response {
            Response::new(futures::stream::iter(
                Vec::<Result<StreamEvent, skald_llm::Error>>::new(),
            ))
        }
    }

    struct FixedProvider {
        id: String,
    }

    impl LanguageModelProviderBackend for FixedProvider {
        fn id(&self) -> &str {
            &self.id
        }

        fn model(&self, model_id: &str) -> LanguageModel {
            LanguageModel::new(FixedBackend {
                provider_id: self.id.clone(),
                model_id: model_id.to_string(),
            })
        }
    }

    fn fixed_factory(options: ProviderOptions) -> Result<LanguageModelProvider, Error> {
        Ok(LanguageModelProvider::new(FixedProvider { id: options.id }))
    }

    #[test]
    fn constructs_lazily_and_only_once() {
        let constructed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&constructed);

        let mut registry = Registry::new();
        registry.add_provider(
            ProviderRegistration::new("fake", "Fake"),
            move |options: ProviderOptions| {
                counter.fetch_add(1, Ordering::SeqCst);
                fixed_factory(options)
            },
        );
        assert_eq!(constructed.load(Ordering::SeqCst), 0);

        let first = registry.model("fake", "fake-model").unwrap();
        let second = registry.model("fake", "other-model").unwrap();

        assert_eq!(constructed.load(Ordering::SeqCst), 1);
        assert_eq!(first.model_id(), "fake-model");
        assert_eq!(first.provider(), "fake");
        assert_eq!(second.model_id(), "other-model");
    }

    #[test]
    fn missing_credential_fails_at_construction() {
        let mut registration = ProviderRegistration::new("fake", "Fake");
        registration.env = vec!["SKALD_REGISTRY_TEST_NEVER_SET".to_string()];

        let mut registry = Registry::new();
        registry.add_provider(registration, fixed_factory);

        let err = registry.ensure_provider("fake").unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(_)));

        let err = registry.model("fake", "fake-model").unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(_)));
    }

    #[test]
    fn env_candidates_resolve_in_order() {
        // Safety: the var name is unique to this test.
        unsafe { std::env::set_var("SKALD_REGISTRY_TEST_KEY", "sk-test") };

        let mut registration = ProviderRegistration::new("fake", "Fake");
        registration.env = vec![
            "SKALD_REGISTRY_TEST_NEVER_SET".to_string(),
            "SKALD_REGISTRY_TEST_KEY".to_string(),
        ];

        let mut registry = Registry::new();
        registry.add_provider(registration, |options: ProviderOptions| {
            assert_eq!(options.api_key.as_deref(), Some("sk-test"));
            fixed_factory(options)
        });

        registry.ensure_provider("fake").unwrap();
        // Idempotent in effect: a second call does not reconstruct.
        registry.ensure_provider("fake").unwrap();
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let mut registry = Registry::new();
        let err = registry.model("nope", "m").unwrap_err();
        assert!(matches!(err, Error::ProviderNotFound(p) if p == "nope"));
    }

    #[test]
    fn catalog_gates_model_ids() {
        let mut registration = ProviderRegistration::new("fake", "Fake");
        registration.models = vec![ModelSpec::new("fake-model")];

        let mut registry = Registry::new();
        registry.add_provider(registration, fixed_factory);

        assert!(registry.model("fake", "fake-model").is_ok());
        let err = registry.model("fake", "missing-model").unwrap_err();
        assert!(matches!(err, Error::ModelNotFound { .. }));
    }

    #[test]
    fn specifier_parsing() {
        let mut registry = Registry::new();
        registry.add_provider(ProviderRegistration::new("fake", "Fake"), fixed_factory);

        let model = registry.model_from_string("fake:fake-model").unwrap();
        assert_eq!(model.model_id(), "fake-model");

        let err = registry.model_from_string("no-colon").unwrap_err();
        assert!(matches!(err, Error::InvalidSpecifier(_)));
    }

    #[test]
    fn availability_follows_env_presence() {
        // Safety: the var name is unique to this test.
        unsafe { std::env::set_var("SKALD_REGISTRY_TEST_AVAILABLE", "sk-test") };

        let mut with_env = ProviderRegistration::new("with-env", "With Env");
        with_env.env = vec!["SKALD_REGISTRY_TEST_AVAILABLE".to_string()];
        let mut without_env = ProviderRegistration::new("unset-env", "Unset Env");
        without_env.env = vec!["SKALD_REGISTRY_TEST_NEVER_SET".to_string()];

        let mut registry = Registry::new();
        registry.add_provider(ProviderRegistration::new("credless", "Credless"), fixed_factory);
        registry.add_provider(with_env, fixed_factory);
        registry.add_provider(without_env, fixed_factory);

        let ids: Vec<String> = registry
            .available_providers()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["credless", "with-env"]);
    }
}

//! # skald-llm-registry
//!
//! A registry of named language model providers.
//!
//! Provider crates contribute a [`ProviderRegistration`] (identity, endpoint,
//! credential env vars, model catalog) and a [`ProviderFactory`] that builds
//! the live [`skald_llm::LanguageModelProvider`]. The registry constructs each
//! provider at most once, resolving its credential from the environment, and
//! hands out [`skald_llm::LanguageModel`] handles.
//!
//! # Quick start
//!
//! ```ignore
//! use skald_llm_registry::{ProviderRegistration, Registry};
//!
//! let mut registry = Registry::new();
//!
//! let mut registration = ProviderRegistration::new("deepseek", "DeepSeek");
//! registration.env = vec!["DEEPSEEK_API_KEY".into()];
//! registration.api_endpoint = Some("https://api.deepseek.com".into());
//! registry.add_provider(registration, skald_llm_openai::factory);
//!
//! // Fail fast at startup if the credential is absent.
//! registry.ensure_provider("deepseek")?;
//!
//! // Get a model handle (constructs the provider lazily if needed).
//! let model = registry.model("deepseek", "deepseek-chat")?;
//! // or: let model = registry.model_from_string("deepseek:deepseek-chat")?;
//! ```

pub mod catalog;
pub mod error;
pub mod factory;
pub mod provider;
pub mod registry;

pub use catalog::{Modalities, ModelCost, ModelLimit, ModelSpec};
pub use error::Error;
pub use factory::{ProviderFactory, ProviderOptions};
pub use provider::ProviderRegistration;
pub use registry::{AvailableProvider, Registry};

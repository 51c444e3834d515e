//! Registry integration for Chat Completions endpoints.

use skald_llm_registry::{ProviderOptions, ProviderRegistration, Registry};

use crate::{OpenAIConfig, provider};

pub const PROVIDER_ID: &str = "openai";
pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1";

/// Register the stock OpenAI endpoint under the `openai` provider id.
pub fn register(registry: &mut Registry) {
    let mut registration = ProviderRegistration::new(PROVIDER_ID, "OpenAI");
    registration.env = vec!["OPENAI_API_KEY".to_string()];
    registration.api_endpoint = Some(DEFAULT_API_ENDPOINT.to_string());
    registry.add_provider(registration, factory);
}

/// Provider factory for any endpoint speaking the Chat Completions protocol.
///
/// Registration crates for compatible endpoints (alternative hosts, local
/// servers) point their own registration at this factory; the resolved
/// endpoint and provider id come through [`ProviderOptions`].
pub fn factory(
    options: ProviderOptions,
) -> Result<skald_llm::LanguageModelProvider, skald_llm_registry::Error> {
    let config = OpenAIConfig {
        api_key: options.api_key.unwrap_or_default(),
        base_url: options
            .api_endpoint
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.into()),
        provider_id: options.id,
    };

    provider(config).map_err(|err| skald_llm_registry::Error::Factory(Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_rejects_a_missing_key() {
        let err = factory(ProviderOptions {
            id: "openai".into(),
            api_key: None,
            api_endpoint: None,
        })
        .unwrap_err();
        assert!(matches!(err, skald_llm_registry::Error::Factory(_)));
    }

    #[test]
    fn factory_builds_for_alternative_endpoints() {
        let provider = factory(ProviderOptions {
            id: "deepseek".into(),
            api_key: Some("sk-test".into()),
            api_endpoint: Some("https://api.deepseek.com".into()),
        })
        .unwrap();
        assert_eq!(provider.id(), "deepseek");
    }
}

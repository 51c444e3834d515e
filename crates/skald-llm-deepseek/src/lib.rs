//! Registry integration for DeepSeek.
//!
//! DeepSeek serves the Chat Completions protocol, so this crate is only a
//! registration: endpoint, credential candidates, and a static model catalog
//! routed through the `skald-llm-openai` factory.

use skald_llm_registry::{Modalities, ModelCost, ModelLimit, ModelSpec, ProviderRegistration, Registry};

pub const PROVIDER_ID: &str = "deepseek";
pub const PROVIDER_NAME: &str = "DeepSeek";
pub const DEFAULT_MODEL_ID: &str = "deepseek-chat";
pub const DEFAULT_API_ENDPOINT: &str = "https://api.deepseek.com";

/// Env vars consulted for the API key, in priority order. `OPENAI_API_KEY`
/// is accepted as a fallback so OpenAI-style deployments work unchanged
/// against this endpoint.
pub const API_KEY_ENV_VARS: &[&str] = &["DEEPSEEK_API_KEY", "OPENAI_API_KEY"];

/// Register the DeepSeek provider.
pub fn register(registry: &mut Registry) {
    let mut registration = ProviderRegistration::new(PROVIDER_ID, PROVIDER_NAME);
    registration.env = API_KEY_ENV_VARS.iter().map(|s| s.to_string()).collect();
    registration.api_endpoint = Some(DEFAULT_API_ENDPOINT.to_string());
    registration.models = deepseek_models();
    registry.add_provider(registration, skald_llm_openai::factory);
}

fn deepseek_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec {
            id: "deepseek-chat".to_string(),
            name: Some("DeepSeek Chat".to_string()),
            reasoning: false,
            temperature: true,
            modalities: Some(text_modalities()),
            cost: Some(ModelCost {
                input: 0.27,
                output: 1.10,
                cache_read: Some(0.07),
            }),
            limit: Some(ModelLimit {
                context: 65_536,
                output: 8_192,
            }),
        },
        ModelSpec {
            id: "deepseek-reasoner".to_string(),
            name: Some("DeepSeek Reasoner".to_string()),
            reasoning: true,
            temperature: false,
            modalities: Some(text_modalities()),
            cost: Some(ModelCost {
                input: 0.55,
                output: 2.19,
                cache_read: Some(0.14),
            }),
            limit: Some(ModelLimit {
                context: 65_536,
                output: 65_536,
            }),
        },
    ]
}

fn text_modalities() -> Modalities {
    Modalities {
        input: vec!["text".to_string()],
        output: vec!["text".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_declares_the_catalog() {
        let mut registry = Registry::new();
        register(&mut registry);

        assert!(registry.has_provider(PROVIDER_ID));
        let ids: Vec<String> = registry
            .list_models(PROVIDER_ID)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["deepseek-chat", "deepseek-reasoner"]);
    }

    #[test]
    fn the_default_model_is_in_the_catalog() {
        let mut registry = Registry::new();
        register(&mut registry);

        let spec = registry.model_spec(PROVIDER_ID, DEFAULT_MODEL_ID).unwrap();
        assert!(!spec.reasoning);
        assert!(spec.temperature);
    }

    #[test]
    fn reasoner_is_marked_as_reasoning() {
        let mut registry = Registry::new();
        register(&mut registry);

        let spec = registry.model_spec(PROVIDER_ID, "deepseek-reasoner").unwrap();
        assert!(spec.reasoning);
    }

    #[test]
    fn endpoint_and_credentials_come_from_the_registration() {
        let mut registry = Registry::new();
        register(&mut registry);

        let registration = registry.registration(PROVIDER_ID).unwrap();
        assert_eq!(
            registration.api_endpoint.as_deref(),
            Some("https://api.deepseek.com")
        );
        assert_eq!(
            registration.env,
            vec!["DEEPSEEK_API_KEY", "OPENAI_API_KEY"]
        );
    }
}

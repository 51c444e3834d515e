//! Streaming Chat Completions provider.
//!
//! Works against any endpoint speaking the OpenAI-compatible Chat Completions
//! protocol, whether that is the stock OpenAI API, DeepSeek, or a local
//! inference server.
//! The endpoint and credential are fixed at construction; model handles are
//! created per model id and stream their output over SSE.

mod convert;
#[cfg(feature = "registry")]
mod register;
mod stream;
mod types;

#[cfg(feature = "registry")]
pub use register::{DEFAULT_API_ENDPOINT, PROVIDER_ID, factory, register};

use std::sync::Arc;

use skald_llm::request::GenerateRequest;
use skald_llm::response::Response;
use skald_llm::{
    Error, LanguageModel, LanguageModelBackend, LanguageModelProvider,
    LanguageModelProviderBackend, RequestBuilder,
};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Configuration for a Chat Completions provider.
pub struct OpenAIConfig {
    /// Bearer credential sent with every request. Must be non-empty.
    pub api_key: String,
    /// Endpoint base URL; `{base_url}/chat/completions` is the request target.
    pub base_url: String,
    /// Provider id reported by handles (e.g. `"openai"`, `"deepseek"`).
    /// Endpoints that speak the same protocol register under their own id.
    pub provider_id: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".into(),
            provider_id: "openai".into(),
        }
    }
}

/// Create a provider with the given config.
///
/// Fails with [`Error::Configuration`] when the credential is empty, so a
/// misconfigured process stops at construction rather than on first use.
pub fn provider(config: OpenAIConfig) -> Result<LanguageModelProvider, Error> {
    if config.api_key.trim().is_empty() {
        return Err(Error::Configuration(format!(
            "provider '{}' requires a non-empty api key",
            config.provider_id
        )));
    }

    Ok(LanguageModelProvider::new(OpenAIProvider {
        state: Arc::new(ProviderState {
            client: reqwest::Client::new(),
            config,
        }),
    }))
}

/// Create a provider reading `OPENAI_API_KEY` from the environment.
pub fn from_env() -> Result<LanguageModelProvider, Error> {
    provider(OpenAIConfig {
        api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// Extension trait for protocol-specific request options
// ---------------------------------------------------------------------------

/// Extension methods for [`RequestBuilder`] that set Chat Completions options
/// not covered by the generic builder.
///
/// ```ignore
/// use skald_llm_openai::OpenAIRequestExt;
///
/// let mut req = skald_llm::request();
/// req.user("List three rust crates as json")
///    .json_output()
///    .frequency_penalty(0.2);
/// model.generate(req);
/// ```
pub trait OpenAIRequestExt {
    /// Penalize tokens by their frequency so far (-2.0 ..= 2.0).
    fn frequency_penalty(&mut self, penalty: f32) -> &mut Self;

    /// Penalize tokens that already appeared at all (-2.0 ..= 2.0).
    fn presence_penalty(&mut self, penalty: f32) -> &mut Self;

    /// Ask the endpoint to emit a single JSON object.
    fn json_output(&mut self) -> &mut Self;
}

impl OpenAIRequestExt for RequestBuilder {
    fn frequency_penalty(&mut self, penalty: f32) -> &mut Self {
        self.meta("frequency_penalty", penalty)
    }

    fn presence_penalty(&mut self, penalty: f32) -> &mut Self {
        self.meta("presence_penalty", penalty)
    }

    fn json_output(&mut self) -> &mut Self {
        self.meta("response_format", "json_object")
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

pub(crate) struct ProviderState {
    pub(crate) client: reqwest::Client,
    pub(crate) config: OpenAIConfig,
}

struct OpenAIProvider {
    state: Arc<ProviderState>,
}

impl LanguageModelProviderBackend for OpenAIProvider {
    fn id(&self) -> &str {
        &self.state.config.provider_id
    }

    fn model(&self, model_id: &str) -> LanguageModel {
        LanguageModel::new(OpenAIModel {
            model_id: model_id.to_string(),
            state: Arc::clone(&self.state),
        })
    }
}

struct OpenAIModel {
    model_id: String,
    state: Arc<ProviderState>,
}

impl LanguageModelBackend for OpenAIModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn provider(&self) -> &str {
        &self.state.config.provider_id
    }

    fn generate(&self, request: GenerateRequest) -> Response {
        let body = convert::to_chat_request(&self.model_id, &request);
        let state = Arc::clone(&self.state);
        let event_stream = stream::open(state, body);
        Response::new(event_stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let err = provider(OpenAIConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = provider(OpenAIConfig {
            api_key: "   ".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn handles_report_the_configured_provider_id() {
        let provider = provider(OpenAIConfig {
            api_key: "sk-test".into(),
            base_url: "https://api.deepseek.com".into(),
            provider_id: "deepseek".into(),
        })
        .unwrap();

        assert_eq!(provider.id(), "deepseek");
        let model = provider.model("deepseek-chat");
        assert_eq!(model.model_id(), "deepseek-chat");
        assert_eq!(model.provider(), "deepseek");
    }
}

//! Provider registration metadata.

use crate::catalog::ModelSpec;

/// Everything the registry needs to know about a provider before it is
/// constructed.
#[derive(Debug, Clone)]
pub struct ProviderRegistration {
    pub id: String,
    /// Human-friendly display name (e.g. `"DeepSeek"`).
    pub name: String,
    /// Candidate environment variable names for the API key, in priority
    /// order. Empty means the provider needs no credential.
    pub env: Vec<String>,
    /// Base API endpoint. `None` lets the factory pick its default.
    pub api_endpoint: Option<String>,
    /// Statically declared model catalog. An empty catalog accepts any
    /// model id.
    pub models: Vec<ModelSpec>,
}

impl ProviderRegistration {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            env: Vec::new(),
            api_endpoint: None,
            models: Vec::new(),
        }
    }
}

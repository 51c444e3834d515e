//! Static model catalog types.
//!
//! Registrations declare the models they serve up front; the registry answers
//! catalog queries without touching the network.

use serde::{Deserialize, Serialize};

/// A model entry within a provider's catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model identifier, e.g. `"deepseek-chat"`.
    pub id: String,

    /// Human-friendly display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the model emits reasoning output before its answer.
    #[serde(default)]
    pub reasoning: bool,

    /// Whether the temperature parameter is accepted.
    #[serde(default)]
    pub temperature: bool,

    /// Input/output modalities.
    #[serde(default)]
    pub modalities: Option<Modalities>,

    /// Pricing information (per million tokens).
    #[serde(default)]
    pub cost: Option<ModelCost>,

    /// Token limits.
    #[serde(default)]
    pub limit: Option<ModelLimit>,
}

impl ModelSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            reasoning: false,
            temperature: true,
            modalities: None,
            cost: None,
            limit: None,
        }
    }
}

/// Input/output modality declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modalities {
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default)]
    pub output: Vec<String>,
}

/// Cost per million tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCost {
    /// Input cost ($/M tokens).
    #[serde(default)]
    pub input: f64,
    /// Output cost ($/M tokens).
    #[serde(default)]
    pub output: f64,
    /// Cached read cost ($/M tokens), if supported.
    #[serde(default)]
    pub cache_read: Option<f64>,
}

/// Token limits for the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLimit {
    /// Maximum context window size in tokens.
    #[serde(default)]
    pub context: u64,
    /// Maximum output tokens.
    #[serde(default)]
    pub output: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_entry_deserializes_with_defaults() {
        let spec: ModelSpec = serde_json::from_str(r#"{"id": "deepseek-chat"}"#).unwrap();

        assert_eq!(spec.id, "deepseek-chat");
        assert_eq!(spec.name, None);
        assert!(!spec.reasoning);
        assert!(spec.limit.is_none());
    }
}

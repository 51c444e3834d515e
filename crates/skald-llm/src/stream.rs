use serde::{Deserialize, Serialize};

/// An event emitted during streaming generation.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A chunk of text output.
    TextDelta(String),

    /// A chunk of reasoning output, emitted by reasoning-capable models
    /// before their visible answer.
    ReasoningDelta(String),

    /// Generation is complete.
    Finish {
        reason: FinishReason,
        usage: Option<Usage>,
    },

    /// An error reported by the endpoint mid-stream.
    Error(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_tokens: Option<u32>,
}

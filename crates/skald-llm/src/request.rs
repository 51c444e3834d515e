use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Top-level request
// ---------------------------------------------------------------------------

/// The frozen, built request. Produced by a builder, consumed by `generate()`.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub messages: Vec<Message>,
    pub options: GenerateOptions,
    /// Provider-specific metadata. Passed through to the backend as-is.
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Knobs that control generation behavior.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub stop: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Provider-agnostic request builder. Provider crates extend it with typed
/// provider-specific methods through extension traits writing into `metadata`.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    pub(crate) messages: Vec<Message>,
    pub(crate) options: GenerateOptions,
    pub(crate) metadata: HashMap<String, serde_json::Value>,
}

/// Convenience entry point: `skald_llm::request()`.
pub fn request() -> RequestBuilder {
    RequestBuilder::default()
}

impl RequestBuilder {
    // -- messages --

    pub fn system(&mut self, text: impl Into<String>) -> &mut Self {
        self.messages.push(Message::system(text));
        self
    }

    pub fn user(&mut self, text: impl Into<String>) -> &mut Self {
        self.messages.push(Message::user(text));
        self
    }

    pub fn assistant(&mut self, text: impl Into<String>) -> &mut Self {
        self.messages.push(Message::assistant(text));
        self
    }

    pub fn message(&mut self, message: Message) -> &mut Self {
        self.messages.push(message);
        self
    }

    pub fn messages(&mut self, messages: impl IntoIterator<Item = Message>) -> &mut Self {
        self.messages.extend(messages);
        self
    }

    // -- options --

    pub fn temperature(&mut self, t: f32) -> &mut Self {
        self.options.temperature = Some(t);
        self
    }

    pub fn max_tokens(&mut self, n: u32) -> &mut Self {
        self.options.max_tokens = Some(n);
        self
    }

    pub fn top_p(&mut self, p: f32) -> &mut Self {
        self.options.top_p = Some(p);
        self
    }

    pub fn stop(&mut self, sequences: Vec<String>) -> &mut Self {
        self.options.stop = Some(sequences);
        self
    }

    // -- metadata --

    pub fn meta(
        &mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> &mut Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    // -- build --

    pub fn build(self) -> GenerateRequest {
        self.into()
    }
}

impl From<RequestBuilder> for GenerateRequest {
    fn from(b: RequestBuilder) -> Self {
        GenerateRequest {
            messages: b.messages,
            options: b.options,
            metadata: b.metadata,
        }
    }
}

// ---------------------------------------------------------------------------
// Message parts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

/// System messages carry plain instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SystemPart {
    Text(TextPart),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UserPart {
    Text(TextPart),
}

/// Assistant turns may interleave visible text with reasoning emitted by
/// reasoning-capable models. Reasoning is retained for display and session
/// storage; providers decide whether it is ever sent back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AssistantPart {
    Text(TextPart),
    Reasoning(TextPart),
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    System { parts: Vec<SystemPart> },
    User { parts: Vec<UserPart> },
    Assistant { parts: Vec<AssistantPart> },
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Message::System {
            parts: vec![SystemPart::Text(TextPart { text: text.into() })],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Message::User {
            parts: vec![UserPart::Text(TextPart { text: text.into() })],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Message::Assistant {
            parts: vec![AssistantPart::Text(TextPart { text: text.into() })],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_messages_in_order() {
        let mut b = request();
        b.system("be terse").user("hi").assistant("hello");
        let req = b.build();

        assert_eq!(req.messages.len(), 3);
        assert!(matches!(req.messages[0], Message::System { .. }));
        assert!(matches!(req.messages[1], Message::User { .. }));
        assert!(matches!(req.messages[2], Message::Assistant { .. }));
    }

    #[test]
    fn builder_sets_options_and_metadata() {
        let mut b = request();
        b.user("hi")
            .temperature(0.3)
            .max_tokens(256)
            .meta("frequency_penalty", 0.5);
        let req = b.build();

        assert_eq!(req.options.temperature, Some(0.3));
        assert_eq!(req.options.max_tokens, Some(256));
        assert_eq!(
            req.metadata.get("frequency_penalty"),
            Some(&serde_json::json!(0.5))
        );
    }
}

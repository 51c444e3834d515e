//! Converts the generic skald-llm request types to the Chat Completions wire
//! format.

use skald_llm::request::{AssistantPart, GenerateRequest, Message, SystemPart, UserPart};

use crate::types::{ChatMessage, ChatRequest, ResponseFormat, Role, StreamOptions};

pub fn to_chat_request(model_id: &str, req: &GenerateRequest) -> ChatRequest {
    let mut messages = Vec::new();

    for msg in &req.messages {
        match msg {
            Message::System { parts } => {
                let text: String = parts
                    .iter()
                    .map(|p| match p {
                        SystemPart::Text(t) => t.text.as_str(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                messages.push(ChatMessage {
                    role: Role::System,
                    content: text,
                });
            }
            Message::User { parts } => {
                let text: String = parts
                    .iter()
                    .map(|p| match p {
                        UserPart::Text(t) => t.text.as_str(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                messages.push(ChatMessage {
                    role: Role::User,
                    content: text,
                });
            }
            Message::Assistant { parts } => {
                // Reasoning output must not be replayed as input; only the
                // visible text goes back to the endpoint.
                let text: String = parts
                    .iter()
                    .filter_map(|p| match p {
                        AssistantPart::Text(t) => Some(t.text.as_str()),
                        AssistantPart::Reasoning(_) => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                if !text.is_empty() {
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: text,
                    });
                }
            }
        }
    }

    let presence_penalty = req
        .metadata
        .get("presence_penalty")
        .and_then(|v| v.as_f64())
        .map(|v| v as f32);
    let frequency_penalty = req
        .metadata
        .get("frequency_penalty")
        .and_then(|v| v.as_f64())
        .map(|v| v as f32);
    let response_format = req
        .metadata
        .get("response_format")
        .and_then(|v| v.as_str())
        .map(|v| match v {
            "json_object" => ResponseFormat::JsonObject,
            _ => ResponseFormat::Text,
        });

    ChatRequest {
        model: model_id.to_string(),
        messages,
        stream: true,
        stream_options: Some(StreamOptions {
            include_usage: true,
        }),
        temperature: req.options.temperature,
        top_p: req.options.top_p,
        max_tokens: req.options.max_tokens,
        stop: req.options.stop.clone(),
        presence_penalty,
        frequency_penalty,
        response_format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpenAIRequestExt;
    use skald_llm::request::request;

    #[test]
    fn maps_messages_and_options() {
        let mut b = request();
        b.system("be terse")
            .user("hi")
            .assistant("hello")
            .temperature(0.7)
            .max_tokens(128);
        let req = b.build();

        let wire = to_chat_request("deepseek-chat", &req);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["stream"], true);
        assert_eq!(json["stream_options"]["include_usage"], true);
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        assert_eq!(json["max_tokens"], 128);
        assert_eq!(
            json["messages"],
            serde_json::json!([
                {"role": "system", "content": "be terse"},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
            ])
        );
        // Unset options are omitted entirely.
        assert!(json.get("top_p").is_none());
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn metadata_options_pass_through() {
        let mut b = request();
        b.user("hi").json_output().frequency_penalty(0.5);
        let wire = to_chat_request("deepseek-chat", &b.build());
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["frequency_penalty"], 0.5);
    }

    #[test]
    fn reasoning_parts_are_not_replayed() {
        use skald_llm::request::{AssistantPart, Message, TextPart};

        let mut b = request();
        b.user("question").message(Message::Assistant {
            parts: vec![
                AssistantPart::Reasoning(TextPart {
                    text: "private chain of thought".into(),
                }),
                AssistantPart::Text(TextPart {
                    text: "answer".into(),
                }),
            ],
        });
        b.user("follow-up");

        let wire = to_chat_request("deepseek-reasoner", &b.build());
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["messages"][1]["content"], "answer");
        assert!(
            !json["messages"].to_string().contains("chain of thought"),
            "reasoning text must never reach the wire"
        );
    }
}

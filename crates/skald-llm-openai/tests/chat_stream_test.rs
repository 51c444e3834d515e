//! End-to-end transport tests against a mock Chat Completions endpoint.

use skald_llm::request::request;
use skald_llm::{Error, FinishReason};
use skald_llm_openai::{OpenAIConfig, provider};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_body(lines: &[&str]) -> String {
    let mut body = String::new();
    for line in lines {
        body.push_str("data: ");
        body.push_str(line);
        body.push_str("\n\n");
    }
    body
}

fn mock_provider(server: &MockServer) -> skald_llm::LanguageModelProvider {
    provider(OpenAIConfig {
        api_key: "sk-test".into(),
        base_url: server.uri(),
        provider_id: "deepseek".into(),
    })
    .unwrap()
}

#[tokio::test]
async fn streamed_chunks_collect_into_a_result() {
    let server = MockServer::start().await;

    let body = sse_body(&[
        r#"{"id":"c1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"role":"assistant","content":"Hello"},"finish_reason":null}]}"#,
        r#"{"id":"c1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{"content":" world"},"finish_reason":null}]}"#,
        r#"{"id":"c1","object":"chat.completion.chunk","choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#,
        r#"{"id":"c1","object":"chat.completion.chunk","choices":[],"usage":{"prompt_tokens":5,"completion_tokens":2}}"#,
        "[DONE]",
    ]);

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "deepseek-chat",
            "stream": true,
            "stream_options": {"include_usage": true},
            "messages": [{"role": "user", "content": "hi"}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let model = mock_provider(&server).model("deepseek-chat");
    let mut req = request();
    req.user("hi");
    let result = model.generate(req).into_result().await.unwrap();

    assert_eq!(result.text, "Hello world");
    assert_eq!(result.reasoning, None);
    assert_eq!(result.finish_reason, FinishReason::Stop);
    assert_eq!(result.usage.input_tokens, 5);
    assert_eq!(result.usage.output_tokens, 2);
}

#[tokio::test]
async fn reasoning_content_is_collected_separately() {
    let server = MockServer::start().await;

    let body = sse_body(&[
        r#"{"choices":[{"index":0,"delta":{"reasoning_content":"let me think"},"finish_reason":null}]}"#,
        r#"{"choices":[{"index":0,"delta":{"content":"42"},"finish_reason":"stop"}]}"#,
        "[DONE]",
    ]);

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let model = mock_provider(&server).model("deepseek-reasoner");
    let mut req = request();
    req.user("meaning of life?");
    let result = model.generate(req).into_result().await.unwrap();

    assert_eq!(result.text, "42");
    assert_eq!(result.reasoning.as_deref(), Some("let me think"));
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error":{"message":"invalid api key"}}"#),
        )
        .mount(&server)
        .await;

    let model = mock_provider(&server).model("deepseek-chat");
    let mut req = request();
    req.user("hi");
    let err = model.generate(req).into_result().await.unwrap_err();

    match err {
        Error::Api { code, message } => {
            assert_eq!(code, "401");
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_chunks_surface_as_json_errors() {
    let server = MockServer::start().await;

    let body = sse_body(&["{not json", "[DONE]"]);

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let model = mock_provider(&server).model("deepseek-chat");
    let mut req = request();
    req.user("hi");
    let err = model.generate(req).into_result().await.unwrap_err();

    assert!(matches!(err, Error::Json(_)));
}

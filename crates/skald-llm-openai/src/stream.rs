//! Opens the SSE connection to a Chat Completions endpoint and maps chunks to
//! skald-llm `StreamEvent`s.

use crate::ProviderState;
use crate::types::{ChatChunk, ChatRequest};
use eventsource_stream::Eventsource;
use futures::Stream;
use skald_llm::error::Error;
use skald_llm::stream::{FinishReason, StreamEvent, Usage};
use std::sync::Arc;
use tokio_stream::StreamExt;

pub fn open(
    state: Arc<ProviderState>,
    body: ChatRequest,
) -> impl Stream<Item = Result<StreamEvent, Error>> + Send {
    async_stream::try_stream! {
        let url = format!("{}/chat/completions", state.config.base_url);
        tracing::debug!(%url, model = %body.model, "dispatching chat completion");

        let resp = state
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", state.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http(Box::new(e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                code: status.as_str().to_string(),
                message: body_text,
            })?;
            unreachable!();
        }

        let mut sse = resp.bytes_stream().eventsource();
        let mut mapper = ChunkMapper::new();

        while let Some(event) = sse.next().await {
            match event {
                Ok(event) => {
                    // The terminator is a bare sentinel, not JSON.
                    if event.data.trim() == "[DONE]" {
                        break;
                    }
                    let chunk: ChatChunk = serde_json::from_str(&event.data)?;
                    for stream_event in mapper.map_chunk(chunk) {
                        yield stream_event;
                    }
                }
                Err(e) => {
                    Err(Error::Sse(e.to_string()))?;
                }
            }
        }

        yield mapper.finish();
    }
}

// ---------------------------------------------------------------------------
// Chunk mapper (stateful: finish reason and usage arrive in separate chunks)
// ---------------------------------------------------------------------------

struct ChunkMapper {
    finish_reason: Option<FinishReason>,
    usage: Option<Usage>,
}

impl ChunkMapper {
    fn new() -> Self {
        Self {
            finish_reason: None,
            usage: None,
        }
    }

    fn map_chunk(&mut self, chunk: ChatChunk) -> Vec<StreamEvent> {
        if let Some(u) = chunk.usage {
            self.usage = Some(Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                reasoning_tokens: u
                    .completion_tokens_details
                    .and_then(|d| d.reasoning_tokens),
                cached_tokens: u.prompt_tokens_details.and_then(|d| d.cached_tokens),
            });
        }

        let mut events = Vec::new();
        for choice in chunk.choices {
            if let Some(reasoning) = choice.delta.reasoning_content
                && !reasoning.is_empty()
            {
                events.push(StreamEvent::ReasoningDelta(reasoning));
            }
            if let Some(content) = choice.delta.content
                && !content.is_empty()
            {
                events.push(StreamEvent::TextDelta(content));
            }
            if let Some(reason) = choice.finish_reason {
                self.finish_reason = Some(map_finish_reason(&reason));
            }
        }
        events
    }

    /// The single Finish event, emitted once the stream terminates.
    fn finish(self) -> StreamEvent {
        StreamEvent::Finish {
            reason: self.finish_reason.unwrap_or(FinishReason::Stop),
            usage: self.usage,
        }
    }
}

fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        other => FinishReason::Other(other.to_string()),
    }
}

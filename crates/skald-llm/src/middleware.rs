//! Model-level middleware.
//!
//! A [`ModelMiddleware`] is a capability attached to a model handle: it may
//! rewrite the request before the provider sees it, and rewrite or drop each
//! stream event after the provider emits it. [`apply_middleware`] composes a
//! handle with a chain of middlewares and returns a new handle with the same
//! observable identity.

use std::sync::Arc;

use futures::{StreamExt, stream};

use crate::error::Error;
use crate::model::{LanguageModel, LanguageModelBackend};
use crate::request::GenerateRequest;
use crate::response::Response;
use crate::stream::StreamEvent;

/// Cross-cutting hooks applied uniformly to every call on a decorated model.
///
/// Both hooks default to pass-through, so a middleware implements only the
/// side it cares about. Hooks are infallible by design: failures belong to the
/// transport and flow through the event stream as errors, untouched by
/// middleware.
pub trait ModelMiddleware: Send + Sync {
    /// Transform the request before it reaches the provider.
    fn transform_request(&self, request: GenerateRequest) -> GenerateRequest {
        request
    }

    /// Transform a single stream event after the provider emits it.
    /// May return zero or more events.
    fn on_stream_event(&self, event: StreamEvent) -> Vec<StreamEvent> {
        vec![event]
    }
}

/// Wrap `model` so that every `generate` call runs through `middlewares`.
///
/// Request transforms run in registration order, and each stream event passes
/// through the chain in the same order. The decorated handle reports the same
/// `model_id()` and `provider()` as the original. An empty chain returns the
/// handle unchanged.
pub fn apply_middleware(
    model: LanguageModel,
    middlewares: Vec<Arc<dyn ModelMiddleware>>,
) -> LanguageModel {
    if middlewares.is_empty() {
        return model;
    }
    LanguageModel::new(DecoratedModel {
        inner: model,
        middlewares,
    })
}

struct DecoratedModel {
    inner: LanguageModel,
    middlewares: Vec<Arc<dyn ModelMiddleware>>,
}

impl LanguageModelBackend for DecoratedModel {
    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    fn provider(&self) -> &str {
        self.inner.provider()
    }

    fn generate(&self, request: GenerateRequest) -> Response {
        let mut request = request;
        for mw in &self.middlewares {
            request = mw.transform_request(request);
        }

        let middlewares = self.middlewares.clone();
        let events = self.inner.generate(request).events().flat_map(move |item| {
            let out: Vec<Result<StreamEvent, Error>> = match item {
                Ok(event) => {
                    let mut events = vec![event];
                    for mw in &middlewares {
                        let mut next = Vec::new();
                        for ev in events {
                            next.extend(mw.on_stream_event(ev));
                        }
                        events = next;
                    }
                    events.into_iter().map(Ok).collect()
                }
                // Transport errors bypass the chain.
                Err(e) => vec![Err(e)],
            };
            stream::iter(out)
        });

        Response::new(events)
    }
}

/// Middleware that logs request shape and completion usage through `tracing`.
#[derive(Debug, Default)]
pub struct TraceMiddleware;

impl ModelMiddleware for TraceMiddleware {
    fn transform_request(&self, request: GenerateRequest) -> GenerateRequest {
        tracing::debug!(
            messages = request.messages.len(),
            temperature = ?request.options.temperature,
            max_tokens = ?request.options.max_tokens,
            "model call"
        );
        request
    }

    fn on_stream_event(&self, event: StreamEvent) -> Vec<StreamEvent> {
        if let StreamEvent::Finish { reason, usage } = &event {
            tracing::info!(
                ?reason,
                input_tokens = usage.as_ref().map(|u| u.input_tokens),
                output_tokens = usage.as_ref().map(|u| u.output_tokens),
                "generation finished"
            );
        }
        vec![event]
    }
}

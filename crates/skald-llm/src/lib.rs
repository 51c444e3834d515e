//! # skald-llm
//!
//! Provider-agnostic language model types.
//!
//! Provider crates implement the [`LanguageModelBackend`] and
//! [`LanguageModelProviderBackend`] traits; applications work with the
//! type-erased [`LanguageModel`] and [`LanguageModelProvider`] handles and
//! never see a generic parameter.
//!
//! Cross-cutting behavior is attached with [`ModelMiddleware`] and
//! [`apply_middleware`], which wrap a handle without changing its observable
//! identity.

pub mod error;
pub mod middleware;
pub mod model;
pub mod provider;
pub mod request;
pub mod response;
pub mod stream;

pub use error::Error;
pub use middleware::{ModelMiddleware, TraceMiddleware, apply_middleware};
pub use model::{LanguageModel, LanguageModelBackend};
pub use provider::{LanguageModelProvider, LanguageModelProviderBackend};
pub use request::{
    AssistantPart, GenerateOptions, GenerateRequest, Message, RequestBuilder, SystemPart, TextPart,
    UserPart, request,
};
pub use response::{GenerateResult, Response};
pub use stream::{FinishReason, StreamEvent, Usage};

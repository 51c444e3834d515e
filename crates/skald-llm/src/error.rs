/// Errors that can occur when constructing or invoking a language model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The provider was given an unusable configuration (e.g. an empty
    /// credential). Raised at construction time, never during generation.
    #[error("invalid provider configuration: {0}")]
    Configuration(String),

    #[error("http error: {0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sse error: {0}")]
    Sse(String),

    /// The endpoint answered with a non-success status.
    #[error("api error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("{0}")]
    Other(String),
}

/// Errors produced by the provider registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider with the given id was not registered.
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// A model id was not in the provider's declared catalog.
    #[error("model not found: {provider}:{model}")]
    ModelNotFound { provider: String, model: String },

    /// A `"provider:model"` specifier could not be parsed.
    #[error("invalid model specifier '{0}', expected 'provider:model'")]
    InvalidSpecifier(String),

    /// None of the provider's credential environment variables are set.
    #[error("missing credential: none of [{0}] is set")]
    MissingEnvVar(String),

    /// The provider factory returned an error during construction.
    #[error("provider factory error: {0}")]
    Factory(Box<dyn std::error::Error + Send + Sync>),
}

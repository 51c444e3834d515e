//! Provider factory trait and construction options.

use skald_llm::LanguageModelProvider;

use crate::error::Error;

/// Options passed to a [`ProviderFactory`] when constructing a provider.
///
/// Derived from the provider's registration and the process environment at
/// construction time.
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    /// The provider id (e.g. `"deepseek"`).
    pub id: String,

    /// API key resolved from the environment (first set candidate wins).
    /// `None` only when the registration declares no env candidates.
    pub api_key: Option<String>,

    /// Base API endpoint. `None` means the factory should use its built-in
    /// default.
    pub api_endpoint: Option<String>,
}

/// A factory that can construct a [`LanguageModelProvider`] from
/// [`ProviderOptions`].
///
/// Implement this trait for concrete provider integrations, or pass a closure
/// to [`Registry::add_provider`](crate::Registry::add_provider).
pub trait ProviderFactory: Send + Sync {
    /// Create a provider instance from the given options.
    fn create(&self, options: ProviderOptions) -> Result<LanguageModelProvider, Error>;
}

/// Blanket impl: any `Fn(ProviderOptions) -> Result<LanguageModelProvider, Error>`
/// is a factory.
impl<F> ProviderFactory for F
where
    F: Fn(ProviderOptions) -> Result<LanguageModelProvider, Error> + Send + Sync,
{
    fn create(&self, options: ProviderOptions) -> Result<LanguageModelProvider, Error> {
        (self)(options)
    }
}

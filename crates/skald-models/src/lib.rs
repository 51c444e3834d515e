//! # skald-models
//!
//! The application-facing model factory.
//!
//! A [`ModelFactory`] owns a provider registry and a middleware chain. It is
//! built once by the application's startup sequence ([`ModelFactory::from_env`]
//! for the shipped wiring, [`ModelFactory::new`] to inject a registry) and
//! then handed around immutably. Each [`create_model`](ModelFactory::create_model)
//! call returns a fresh, middleware-decorated [`skald_llm::LanguageModel`].

mod factory;

pub use factory::ModelFactory;
pub use skald_llm_registry::Error;

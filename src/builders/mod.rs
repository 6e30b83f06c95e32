//! Builders
//!
//! Fluent builder for provider configuration.

pub mod config;

pub use config::{provider_config, ProviderConfigBuilder};

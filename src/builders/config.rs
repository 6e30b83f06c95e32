//! Configuration Builder
//!
//! Fluent, validating builder for [`ProviderConfig`].

use secrecy::SecretString;
use std::time::Duration;
use url::Url;

use crate::error::{ConfigurationError, ExchangeError};
use crate::types::{kakao, ProviderConfig, DEFAULT_TIMEOUT};

/// Provider configuration builder.
#[derive(Default)]
pub struct ProviderConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    redirect_uri: Option<String>,
    authorization_url: Option<String>,
    token_url: Option<String>,
    user_info_url: Option<String>,
    timeout: Option<Duration>,
}

impl ProviderConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the client id (REST API key).
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set the redirect URI registered with the provider.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Set the authorization endpoint URL.
    pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    /// Set the token endpoint URL.
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Set the user-info endpoint URL.
    pub fn user_info_url(mut self, url: impl Into<String>) -> Self {
        self.user_info_url = Some(url.into());
        self
    }

    /// Set the per-request timeout. Zero is rejected at build time.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fill the three Kakao endpoint URLs.
    pub fn kakao_endpoints(mut self) -> Self {
        self.authorization_url = Some(kakao::AUTHORIZATION_URL.to_string());
        self.token_url = Some(kakao::TOKEN_URL.to_string());
        self.user_info_url = Some(kakao::USER_INFO_URL.to_string());
        self
    }

    /// Build the provider configuration.
    pub fn build(self) -> Result<ProviderConfig, ExchangeError> {
        let client_id = required(self.client_id, "client_id")?;
        let redirect_uri = required(self.redirect_uri, "redirect_uri")?;
        let authorization_url = required(self.authorization_url, "authorization_url")?;
        let token_url = required(self.token_url, "token_url")?;
        let user_info_url = required(self.user_info_url, "user_info_url")?;

        validate_endpoint("authorization_url", &authorization_url)?;
        validate_endpoint("token_url", &token_url)?;
        validate_endpoint("user_info_url", &user_info_url)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ExchangeError::Configuration(
                ConfigurationError::InvalidConfig {
                    message: "timeout must be non-zero".to_string(),
                },
            ));
        }

        Ok(ProviderConfig {
            client_id,
            client_secret: self.client_secret,
            redirect_uri,
            authorization_url,
            token_url,
            user_info_url,
            timeout,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ExchangeError> {
    value.ok_or_else(|| {
        ExchangeError::Configuration(ConfigurationError::MissingField {
            field: field.to_string(),
        })
    })
}

fn validate_endpoint(field: &str, url: &str) -> Result<(), ExchangeError> {
    let parsed = Url::parse(url).map_err(|_| {
        ExchangeError::Configuration(ConfigurationError::InvalidEndpoint {
            field: field.to_string(),
            url: url.to_string(),
        })
    })?;

    if !parsed.has_host() {
        return Err(ExchangeError::Configuration(
            ConfigurationError::InvalidEndpoint {
                field: field.to_string(),
                url: url.to_string(),
            },
        ));
    }

    Ok(())
}

/// Create a new provider configuration builder.
pub fn provider_config() -> ProviderConfigBuilder {
    ProviderConfigBuilder::new()
}

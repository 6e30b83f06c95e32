//! Configuration Types
//!
//! Static identity-provider settings.

use secrecy::SecretString;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Kakao provider endpoints.
pub mod kakao {
    /// Authorization endpoint the end user is redirected to.
    pub const AUTHORIZATION_URL: &str = "https://kauth.kakao.com/oauth/authorize";
    /// Token endpoint for the code exchange.
    pub const TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
    /// User-info endpoint for the profile lookup.
    pub const USER_INFO_URL: &str = "https://kapi.kakao.com/v2/user/me";
}

/// Immutable identity-provider configuration.
///
/// Built once at process start via [`crate::builders::ProviderConfigBuilder`]
/// and shared read-only across concurrent callers.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Client identifier (Kakao calls this the REST API key).
    pub client_id: String,
    /// Client secret. Held for completeness of the configuration surface;
    /// the token request itself carries no client authentication.
    pub client_secret: Option<SecretString>,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
    /// Pre-configured authorization endpoint URL for caller-side redirects.
    pub authorization_url: String,
    /// Token endpoint URL.
    pub token_url: String,
    /// User-info endpoint URL.
    pub user_info_url: String,
    /// Per-request timeout. Never unbounded.
    pub timeout: Duration,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("redirect_uri", &self.redirect_uri)
            .field("authorization_url", &self.authorization_url)
            .field("token_url", &self.token_url)
            .field("user_info_url", &self.user_info_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = ProviderConfig {
            client_id: "rest-api-key".to_string(),
            client_secret: Some(SecretString::new("super-secret".to_string())),
            redirect_uri: "https://app.example.com/callback".to_string(),
            authorization_url: kakao::AUTHORIZATION_URL.to_string(),
            token_url: kakao::TOKEN_URL.to_string(),
            user_info_url: kakao::USER_INFO_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        };

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }
}

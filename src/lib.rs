//! OAuth2 Login Integration Module
//!
//! Authorization-code login against a third-party identity provider:
//! exchange an authorization code for an access token at the token
//! endpoint, then resolve the token to the authenticated user's profile
//! at the user-info endpoint.
//!
//! # Features
//!
//! - Authorization code → token exchange (RFC 6749 Section 4.1 token leg)
//! - Bearer-token user-info lookup with provider-shape profile mapping
//! - Pre-configured authorization URL for caller-side redirects
//! - Kakao endpoint preset
//! - Injectable HTTP transport and logging observer
//! - Per-step error kinds with the provider's status and body preserved
//!
//! # Example
//!
//! ```rust,ignore
//! use oauth2_login_integration::{provider_config, CodeExchangeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = provider_config()
//!         .client_id("my-rest-api-key")
//!         .redirect_uri("https://myapp.com/oauth/callback")
//!         .kakao_endpoints()
//!         .build()?;
//!
//!     let client = CodeExchangeClient::new(config)?;
//!
//!     // Redirect the end user here to start the provider login.
//!     println!("Authorize at: {}", client.authorization_url());
//!
//!     // Back from the callback with an authorization code:
//!     let (token, profile) = client.login_with_code("code-from-callback").await?;
//!     println!(
//!         "user {} logged in, token valid for {:?}s",
//!         profile.provider_user_id, token.expires_in
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: provider configuration, token response, user profile
//! - `error`: per-step error hierarchy
//! - `core`: HTTP transport interface and implementations
//! - `flows`: the code→token leg
//! - `userinfo`: the token→profile leg
//! - `builders`: fluent configuration builder
//! - `telemetry`: injected logging observer
//! - `client`: high-level client combining both legs

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod telemetry;
pub mod types;
pub mod userinfo;

// Re-export main client
pub use client::{code_exchange_client, CodeExchangeClient};

// Re-export builders
pub use builders::{provider_config, ProviderConfigBuilder};

// Re-export errors
pub use error::{
    parse_provider_error, ConfigurationError, ExchangeError, ExchangeResult, FlowFailure,
    FlowStep, NetworkError, ProviderErrorBody,
};

// Re-export types
pub use types::{kakao, ProviderConfig, TokenResponse, UserProfile, DEFAULT_TIMEOUT};

// Re-export core components
pub use core::{
    create_mock_transport, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    MockHttpTransport, ReqwestHttpTransport, DEFAULT_MAX_RESPONSE_BYTES,
};

// Re-export flows
pub use flows::{
    create_mock_authorization_code_flow, AuthorizationCodeFlow, AuthorizationCodeFlowImpl,
    MockAuthorizationCodeFlow,
};

// Re-export user info
pub use userinfo::{
    create_mock_user_profile_fetcher, MockUserProfileFetcher, UserProfileFetcher,
    UserProfileFetcherImpl,
};

// Re-export telemetry
pub use telemetry::{
    create_console_logger, create_in_memory_logger, no_op_logger, ConsoleLogger, InMemoryLogger,
    LogContext, LogEntry, LogLevel, Logger, NoOpLogger,
};

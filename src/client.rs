//! Code Exchange Client
//!
//! High-level client for the two-leg authorization-code login.

use std::sync::Arc;

use crate::core::{HttpTransport, ReqwestHttpTransport, DEFAULT_MAX_RESPONSE_BYTES};
use crate::error::{ExchangeError, ExchangeResult};
use crate::flows::{AuthorizationCodeFlow, AuthorizationCodeFlowImpl};
use crate::telemetry::{Logger, NoOpLogger};
use crate::types::{ProviderConfig, TokenResponse, UserProfile};
use crate::userinfo::{UserProfileFetcher, UserProfileFetcherImpl};

/// Client performing the authorization-code login against one provider.
///
/// Both legs are single synchronous round trips; no state is retained
/// between calls, so one client instance is safe to share across
/// concurrent callers.
pub struct CodeExchangeClient<T: HttpTransport = ReqwestHttpTransport> {
    config: ProviderConfig,
    transport: Arc<T>,
    logger: Arc<dyn Logger>,
}

impl CodeExchangeClient<ReqwestHttpTransport> {
    /// Create a client with the default reqwest transport.
    pub fn new(config: ProviderConfig) -> Result<Self, ExchangeError> {
        let transport =
            ReqwestHttpTransport::with_options(config.timeout, DEFAULT_MAX_RESPONSE_BYTES)?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
            logger: Arc::new(NoOpLogger),
        })
    }
}

impl<T: HttpTransport> CodeExchangeClient<T> {
    /// Create a client with custom collaborators.
    pub fn with_components(config: ProviderConfig, transport: T, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
            logger,
        }
    }

    /// Attach a logging observer.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Get the provider configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The pre-configured authorization endpoint URL.
    ///
    /// Pure and deterministic; callers redirect the end user here to
    /// start the provider login.
    pub fn authorization_url(&self) -> &str {
        &self.config.authorization_url
    }

    /// Exchange an authorization code for a token response.
    pub async fn exchange_code(&self, code: &str) -> ExchangeResult<TokenResponse> {
        self.flow().exchange_code(code).await
    }

    /// Fetch the user profile for an access token.
    pub async fn fetch_user_profile(&self, access_token: &str) -> ExchangeResult<UserProfile> {
        self.fetcher().fetch_profile(access_token).await
    }

    /// Run both legs: exchange the code, then fetch the profile with the
    /// returned access token.
    pub async fn login_with_code(
        &self,
        code: &str,
    ) -> ExchangeResult<(TokenResponse, UserProfile)> {
        let token = self.exchange_code(code).await?;
        let profile = self.fetch_user_profile(&token.access_token).await?;
        Ok((token, profile))
    }

    fn flow(&self) -> AuthorizationCodeFlowImpl<T> {
        AuthorizationCodeFlowImpl::new(
            self.config.clone(),
            self.transport.clone(),
            self.logger.clone(),
        )
    }

    fn fetcher(&self) -> UserProfileFetcherImpl<T> {
        UserProfileFetcherImpl::new(
            self.config.clone(),
            self.transport.clone(),
            self.logger.clone(),
        )
    }
}

/// Create a client with the default transport.
pub fn code_exchange_client(
    config: ProviderConfig,
) -> Result<CodeExchangeClient, ExchangeError> {
    CodeExchangeClient::new(config)
}

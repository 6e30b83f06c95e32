//! Authorization Code Flow
//!
//! The code→token leg of the login: exchanges an authorization code for
//! an access token at the provider's token endpoint (RFC 6749 Section
//! 4.1, reduced to the request shape this provider accepts).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::form_urlencoded;

use crate::core::{HttpMethod, HttpRequest, HttpTransport};
use crate::error::{ExchangeError, FlowFailure};
use crate::telemetry::{LogContext, Logger};
use crate::types::{ProviderConfig, TokenResponse};

/// Authorization code flow interface.
#[async_trait]
pub trait AuthorizationCodeFlow: Send + Sync {
    /// The pre-configured authorization endpoint URL for user redirect.
    fn authorization_url(&self) -> &str;

    /// Exchange an authorization code for a token response.
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ExchangeError>;
}

/// Authorization code flow implementation.
pub struct AuthorizationCodeFlowImpl<T: HttpTransport> {
    config: ProviderConfig,
    transport: Arc<T>,
    logger: Arc<dyn Logger>,
}

impl<T: HttpTransport> AuthorizationCodeFlowImpl<T> {
    /// Create a new flow.
    pub fn new(config: ProviderConfig, transport: Arc<T>, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            transport,
            logger,
        }
    }

    // The token request carries exactly these four fields. The configured
    // client secret is not sent; the provider authenticates the client by
    // its registered redirect URI and client id.
    fn build_token_request_body(&self, code: &str) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "authorization_code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("code", code)
            .finish()
    }

    fn build_token_request_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        headers.insert("accept".to_string(), "application/json".to_string());
        headers
    }

    fn log_context(&self) -> LogContext {
        LogContext::new()
            .operation("token_exchange")
            .endpoint(&self.config.token_url)
    }
}

#[async_trait]
impl<T: HttpTransport> AuthorizationCodeFlow for AuthorizationCodeFlowImpl<T> {
    fn authorization_url(&self) -> &str {
        &self.config.authorization_url
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ExchangeError> {
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.config.token_url.clone(),
            headers: self.build_token_request_headers(),
            body: Some(self.build_token_request_body(code)),
            timeout: Some(self.config.timeout),
        };

        let context = self.log_context();

        let response = self.transport.send(request).await.map_err(|e| {
            self.logger
                .error(&format!("token exchange transport failure: {}", e), &context);
            ExchangeError::TokenExchangeFailed(FlowFailure::Network(e))
        })?;

        if !response.is_success() {
            self.logger.error(
                &format!("token endpoint returned HTTP {}", response.status),
                &context,
            );
            return Err(ExchangeError::TokenExchangeFailed(FlowFailure::Status {
                status: response.status,
                body: response.body,
            }));
        }

        let token: TokenResponse = serde_json::from_str(&response.body).map_err(|e| {
            self.logger
                .error(&format!("token response was not valid JSON: {}", e), &context);
            ExchangeError::TokenExchangeFailed(FlowFailure::InvalidJson {
                message: e.to_string(),
            })
        })?;

        self.logger.info("access token acquired", &context);
        Ok(token)
    }
}

/// Mock authorization code flow for testing.
#[derive(Default)]
pub struct MockAuthorizationCodeFlow {
    exchange_history: Mutex<Vec<String>>,
    next_response: Mutex<Option<TokenResponse>>,
    next_error: Mutex<Option<ExchangeError>>,
}

impl MockAuthorizationCodeFlow {
    /// Create a new mock flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the next token response.
    pub fn set_next_response(&self, response: TokenResponse) -> &Self {
        *self.next_response.lock().unwrap() = Some(response);
        self
    }

    /// Set the next error.
    pub fn set_next_error(&self, error: ExchangeError) -> &Self {
        *self.next_error.lock().unwrap() = Some(error);
        self
    }

    /// Get the codes passed to `exchange_code`.
    pub fn get_exchange_history(&self) -> Vec<String> {
        self.exchange_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorizationCodeFlow for MockAuthorizationCodeFlow {
    fn authorization_url(&self) -> &str {
        "https://mock.example.com/oauth/authorize"
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ExchangeError> {
        self.exchange_history.lock().unwrap().push(code.to_string());

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        if let Some(response) = self.next_response.lock().unwrap().take() {
            return Ok(response);
        }

        Ok(TokenResponse {
            access_token: "mock-access-token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: Some(21599),
            refresh_token: Some("mock-refresh-token".to_string()),
            refresh_token_expires_in: None,
            scope: None,
            extra: HashMap::new(),
        })
    }
}

/// Create a mock authorization code flow for testing.
pub fn create_mock_authorization_code_flow() -> MockAuthorizationCodeFlow {
    MockAuthorizationCodeFlow::new()
}

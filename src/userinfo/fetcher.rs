//! User Profile Fetcher
//!
//! The token→profile leg of the login: resolves a bearer access token to
//! the authenticated user's profile at the provider's user-info endpoint.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::core::{HttpMethod, HttpRequest, HttpTransport};
use crate::error::{ExchangeError, FlowFailure};
use crate::telemetry::{LogContext, Logger};
use crate::types::{ProviderConfig, UserProfile};

/// User profile fetcher interface.
#[async_trait]
pub trait UserProfileFetcher: Send + Sync {
    /// Fetch the profile for a previously obtained access token.
    ///
    /// The token must still be valid; expiry is the caller's concern.
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, ExchangeError>;
}

/// User profile fetcher implementation.
pub struct UserProfileFetcherImpl<T: HttpTransport> {
    config: ProviderConfig,
    transport: Arc<T>,
    logger: Arc<dyn Logger>,
}

impl<T: HttpTransport> UserProfileFetcherImpl<T> {
    /// Create a new fetcher.
    pub fn new(config: ProviderConfig, transport: Arc<T>, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            transport,
            logger,
        }
    }

    fn build_request(&self, access_token: &str) -> HttpRequest {
        let mut headers = HashMap::new();
        headers.insert(
            "authorization".to_string(),
            format!("Bearer {}", access_token),
        );
        headers.insert("accept".to_string(), "application/json".to_string());

        HttpRequest {
            method: HttpMethod::Get,
            url: self.config.user_info_url.clone(),
            headers,
            body: None,
            timeout: Some(self.config.timeout),
        }
    }

    fn log_context(&self) -> LogContext {
        LogContext::new()
            .operation("profile_fetch")
            .endpoint(&self.config.user_info_url)
    }
}

#[async_trait]
impl<T: HttpTransport> UserProfileFetcher for UserProfileFetcherImpl<T> {
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, ExchangeError> {
        let context = self.log_context();

        let response = self
            .transport
            .send(self.build_request(access_token))
            .await
            .map_err(|e| {
                self.logger
                    .error(&format!("profile fetch transport failure: {}", e), &context);
                ExchangeError::ProfileFetchFailed(FlowFailure::Network(e))
            })?;

        if !response.is_success() {
            self.logger.error(
                &format!("user-info endpoint returned HTTP {}", response.status),
                &context,
            );
            return Err(ExchangeError::ProfileFetchFailed(FlowFailure::Status {
                status: response.status,
                body: response.body,
            }));
        }

        let payload: serde_json::Value = serde_json::from_str(&response.body).map_err(|e| {
            self.logger.error(
                &format!("user-info response was not valid JSON: {}", e),
                &context,
            );
            ExchangeError::ProfileFetchFailed(FlowFailure::InvalidJson {
                message: e.to_string(),
            })
        })?;

        let profile = UserProfile::from_user_info(payload).map_err(|failure| {
            self.logger
                .error(&format!("user-info payload rejected: {}", failure), &context);
            ExchangeError::ProfileFetchFailed(failure)
        })?;

        self.logger.info(
            "user profile acquired",
            &context.extra("user_id", profile.provider_user_id.clone()),
        );
        Ok(profile)
    }
}

/// Mock user profile fetcher for testing.
#[derive(Default)]
pub struct MockUserProfileFetcher {
    fetch_history: Mutex<Vec<String>>,
    next_profile: Mutex<Option<UserProfile>>,
    next_error: Mutex<Option<ExchangeError>>,
}

impl MockUserProfileFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the next profile to return.
    pub fn set_next_profile(&self, profile: UserProfile) -> &Self {
        *self.next_profile.lock().unwrap() = Some(profile);
        self
    }

    /// Set the next error.
    pub fn set_next_error(&self, error: ExchangeError) -> &Self {
        *self.next_error.lock().unwrap() = Some(error);
        self
    }

    /// Get the tokens passed to `fetch_profile`.
    pub fn get_fetch_history(&self) -> Vec<String> {
        self.fetch_history.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserProfileFetcher for MockUserProfileFetcher {
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, ExchangeError> {
        self.fetch_history
            .lock()
            .unwrap()
            .push(access_token.to_string());

        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(error);
        }

        if let Some(profile) = self.next_profile.lock().unwrap().take() {
            return Ok(profile);
        }

        Ok(UserProfile {
            provider_user_id: "mock-user".to_string(),
            nickname: Some("mock".to_string()),
            email: None,
            profile_image_url: None,
            raw: serde_json::json!({ "id": "mock-user" }),
        })
    }
}

/// Create a mock user profile fetcher for testing.
pub fn create_mock_user_profile_fetcher() -> MockUserProfileFetcher {
    MockUserProfileFetcher::new()
}

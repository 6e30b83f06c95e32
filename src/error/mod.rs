//! Error Types
//!
//! Error hierarchy for the authorization-code login flow.
//!
//! Every failure is tagged with the step it occurred in, so callers can
//! branch on `TokenExchangeFailed` vs `ProfileFetchFailed` instead of a
//! single opaque error kind. The underlying cause (transport failure,
//! non-2xx status with the raw body, malformed JSON, missing field) stays
//! retrievable through [`ExchangeError::failure`].

use std::time::Duration;
use thiserror::Error;

/// Root error type for the login integration.
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("token exchange failed: {0}")]
    TokenExchangeFailed(#[source] FlowFailure),

    #[error("user profile fetch failed: {0}")]
    ProfileFetchFailed(#[source] FlowFailure),
}

impl ExchangeError {
    /// Which flow step failed, if any.
    pub fn step(&self) -> Option<FlowStep> {
        match self {
            Self::TokenExchangeFailed(_) => Some(FlowStep::TokenExchange),
            Self::ProfileFetchFailed(_) => Some(FlowStep::ProfileFetch),
            Self::Configuration(_) => None,
        }
    }

    /// The wrapped per-step cause, if any.
    pub fn failure(&self) -> Option<&FlowFailure> {
        match self {
            Self::TokenExchangeFailed(failure) | Self::ProfileFetchFailed(failure) => {
                Some(failure)
            }
            Self::Configuration(_) => None,
        }
    }
}

/// The two legs of the login flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowStep {
    /// Authorization code to access token.
    TokenExchange,
    /// Access token to user profile.
    ProfileFetch,
}

impl FlowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenExchange => "token_exchange",
            Self::ProfileFetch => "profile_fetch",
        }
    }
}

/// Cause of a failed flow step.
#[derive(Error, Debug)]
pub enum FlowFailure {
    #[error("network failure: {0}")]
    Network(#[from] NetworkError),

    #[error("provider returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("provider response was not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("provider response is missing required field: {field}")]
    MissingField { field: String },
}

impl FlowFailure {
    /// HTTP status of a non-2xx provider response, if that is the cause.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of a non-2xx provider response, if that is the cause.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Parse the preserved response body as an OAuth2 error payload.
    pub fn provider_error(&self) -> Option<ProviderErrorBody> {
        self.response_body().and_then(parse_provider_error)
    }
}

/// Network/transport error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("failed to read response body: {message}")]
    BodyRead { message: String },

    #[error("response too large: {size} bytes")]
    ResponseTooLarge { size: usize },
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid endpoint URL for {field}: {url}")]
    InvalidEndpoint { field: String, url: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// Result type for login integration operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// OAuth2 error payload returned by a provider.
///
/// `error_code` carries Kakao's provider-specific code (e.g. `KOE320`).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ProviderErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Parse an OAuth2 error payload from a response body.
pub fn parse_provider_error(body: &str) -> Option<ProviderErrorBody> {
    serde_json::from_str(body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_failure_accessors() {
        let error = ExchangeError::TokenExchangeFailed(FlowFailure::Status {
            status: 400,
            body: "bad request".to_string(),
        });
        assert_eq!(error.step(), Some(FlowStep::TokenExchange));
        assert_eq!(error.failure().and_then(FlowFailure::status), Some(400));
        assert_eq!(
            error.failure().and_then(FlowFailure::response_body),
            Some("bad request")
        );

        let error = ExchangeError::ProfileFetchFailed(FlowFailure::MissingField {
            field: "id".to_string(),
        });
        assert_eq!(error.step(), Some(FlowStep::ProfileFetch));
        assert!(error.failure().unwrap().status().is_none());
    }

    #[test]
    fn test_configuration_has_no_step() {
        let error = ExchangeError::Configuration(ConfigurationError::MissingField {
            field: "client_id".to_string(),
        });
        assert!(error.step().is_none());
        assert!(error.failure().is_none());
    }

    #[test]
    fn test_parse_provider_error() {
        let body = r#"{"error":"invalid_grant","error_description":"authorization code not found","error_code":"KOE320"}"#;
        let parsed = parse_provider_error(body).unwrap();
        assert_eq!(parsed.error, "invalid_grant");
        assert_eq!(
            parsed.error_description.as_deref(),
            Some("authorization code not found")
        );
        assert_eq!(parsed.error_code.as_deref(), Some("KOE320"));
    }

    #[test]
    fn test_provider_error_from_status_failure() {
        let failure = FlowFailure::Status {
            status: 401,
            body: r#"{"error":"invalid_token"}"#.to_string(),
        };
        let parsed = failure.provider_error().unwrap();
        assert_eq!(parsed.error, "invalid_token");

        let failure = FlowFailure::Status {
            status: 502,
            body: "<html>bad gateway</html>".to_string(),
        };
        assert!(failure.provider_error().is_none());
    }

    #[test]
    fn test_flow_step_as_str() {
        assert_eq!(FlowStep::TokenExchange.as_str(), "token_exchange");
        assert_eq!(FlowStep::ProfileFetch.as_str(), "profile_fetch");
    }
}

//! Token Types
//!
//! Token response returned by the provider's token endpoint.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Token response from the code exchange.
///
/// Deserialized exactly as the provider returned it: optional fields that
/// are absent stay `None`, and a payload missing `access_token` or
/// `token_type` is a deserialization failure rather than a defaulted
/// value. Fields this type does not model are preserved in `extra`.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Token type (providers return "bearer" in varying case).
    pub token_type: String,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Refresh token lifetime in seconds (Kakao extension).
    #[serde(default)]
    pub refresh_token_expires_in: Option<u64>,
    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
    /// Additional provider fields.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_response() {
        let json = r#"{"access_token":"abc123","token_type":"bearer","expires_in":21599}"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.access_token, "abc123");
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, Some(21599));
        assert!(response.refresh_token.is_none());
        assert!(response.scope.is_none());
    }

    #[test]
    fn test_parse_full_kakao_response() {
        let json = r#"{
            "token_type": "bearer",
            "access_token": "kakao-access",
            "expires_in": 21599,
            "refresh_token": "kakao-refresh",
            "refresh_token_expires_in": 5183999,
            "scope": "account_email profile",
            "id_token": "opaque"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "kakao-access");
        assert_eq!(response.refresh_token.as_deref(), Some("kakao-refresh"));
        assert_eq!(response.refresh_token_expires_in, Some(5183999));
        assert_eq!(response.scope.as_deref(), Some("account_email profile"));
        assert_eq!(
            response.extra.get("id_token").and_then(Value::as_str),
            Some("opaque")
        );
    }

    #[test]
    fn test_missing_access_token_is_a_parse_failure() {
        let json = r#"{"token_type":"bearer","expires_in":3600}"#;
        assert!(serde_json::from_str::<TokenResponse>(json).is_err());
    }

    #[test]
    fn test_missing_token_type_is_a_parse_failure() {
        let json = r#"{"access_token":"abc123"}"#;
        assert!(serde_json::from_str::<TokenResponse>(json).is_err());
    }
}

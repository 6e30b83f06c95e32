//! Profile Types
//!
//! User profile mapped from the provider's user-info payload.

use serde_json::Value;

use crate::error::FlowFailure;

/// Authenticated user's profile.
///
/// `provider_user_id` is mandatory: a payload without a usable id never
/// becomes a profile. The untouched payload is kept in `raw` for callers
/// that need provider fields beyond the mapped ones.
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
    /// Provider-assigned user id, stringified if the provider sends a number.
    pub provider_user_id: String,
    /// Display name / nickname.
    pub nickname: Option<String>,
    /// Account email.
    pub email: Option<String>,
    /// Profile image URL.
    pub profile_image_url: Option<String>,
    /// Full user-info payload as returned by the provider.
    pub raw: Value,
}

impl UserProfile {
    /// Map a user-info payload into a profile.
    ///
    /// Kakao nests profile data under `kakao_account.profile` and the
    /// legacy `properties` object; both are read with top-level fallbacks
    /// so other providers' flat payloads map too. A missing, null, or
    /// empty `id` is a hard failure.
    pub fn from_user_info(raw: Value) -> Result<Self, FlowFailure> {
        let provider_user_id = match raw.get("id") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => {
                return Err(FlowFailure::MissingField {
                    field: "id".to_string(),
                })
            }
        };

        let nickname = string_at(&raw, &["kakao_account", "profile", "nickname"])
            .or_else(|| string_at(&raw, &["properties", "nickname"]))
            .or_else(|| string_at(&raw, &["nickname"]));

        let email = string_at(&raw, &["kakao_account", "email"])
            .or_else(|| string_at(&raw, &["email"]));

        let profile_image_url = string_at(&raw, &["kakao_account", "profile", "profile_image_url"])
            .or_else(|| string_at(&raw, &["properties", "profile_image"]))
            .or_else(|| string_at(&raw, &["profile_image_url"]));

        Ok(Self {
            provider_user_id,
            nickname,
            email,
            profile_image_url,
            raw,
        })
    }
}

/// Read a string value at a nested path.
fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |v, key| v.get(key))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_is_stringified() {
        let payload = json!({
            "id": 12345,
            "kakao_account": { "email": "user@example.com" }
        });

        let profile = UserProfile::from_user_info(payload).unwrap();
        assert_eq!(profile.provider_user_id, "12345");
        assert_eq!(profile.email.as_deref(), Some("user@example.com"));
        assert!(profile.nickname.is_none());
    }

    #[test]
    fn test_kakao_nested_fields() {
        let payload = json!({
            "id": 987654321,
            "kakao_account": {
                "email": "nick@example.com",
                "profile": {
                    "nickname": "nick",
                    "profile_image_url": "https://img.example.com/nick.jpg"
                }
            },
            "properties": {
                "nickname": "legacy-nick",
                "profile_image": "https://img.example.com/legacy.jpg"
            }
        });

        let profile = UserProfile::from_user_info(payload).unwrap();
        assert_eq!(profile.provider_user_id, "987654321");
        assert_eq!(profile.nickname.as_deref(), Some("nick"));
        assert_eq!(
            profile.profile_image_url.as_deref(),
            Some("https://img.example.com/nick.jpg")
        );
    }

    #[test]
    fn test_properties_fallback() {
        let payload = json!({
            "id": 42,
            "properties": {
                "nickname": "legacy-nick",
                "profile_image": "https://img.example.com/legacy.jpg"
            }
        });

        let profile = UserProfile::from_user_info(payload).unwrap();
        assert_eq!(profile.nickname.as_deref(), Some("legacy-nick"));
        assert_eq!(
            profile.profile_image_url.as_deref(),
            Some("https://img.example.com/legacy.jpg")
        );
    }

    #[test]
    fn test_flat_payload_maps_too() {
        let payload = json!({
            "id": "user-opaque-id",
            "nickname": "flat",
            "email": "flat@example.com"
        });

        let profile = UserProfile::from_user_info(payload).unwrap();
        assert_eq!(profile.provider_user_id, "user-opaque-id");
        assert_eq!(profile.nickname.as_deref(), Some("flat"));
    }

    #[test]
    fn test_missing_id_is_hard_error() {
        let payload = json!({ "kakao_account": { "email": "no-id@example.com" } });
        let err = UserProfile::from_user_info(payload).unwrap_err();
        assert!(matches!(err, FlowFailure::MissingField { ref field } if field == "id"));
    }

    #[test]
    fn test_null_or_empty_id_is_hard_error() {
        assert!(UserProfile::from_user_info(json!({ "id": null })).is_err());
        assert!(UserProfile::from_user_info(json!({ "id": "" })).is_err());
    }

    #[test]
    fn test_raw_payload_is_retained() {
        let payload = json!({ "id": 7, "connected_at": "2024-01-01T00:00:00Z" });
        let profile = UserProfile::from_user_info(payload.clone()).unwrap();
        assert_eq!(profile.raw, payload);
    }
}

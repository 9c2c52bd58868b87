//! Password-reset tokens.
//!
//! Tokens live in a persisted map keyed by lowercased email, so each email has
//! at most one live token. A token is 32 bytes from the thread-local CSPRNG,
//! hex encoded.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Persisted map from lowercased email to its live token.
pub type ResetTokens = BTreeMap<String, PasswordResetToken>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetToken {
    pub token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// A fresh random token expiring at `expires_at`.
    pub fn generate(expires_at: DateTime<Utc>) -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            token: hex::encode(bytes),
            expires_at,
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// The email owning a live token equal to `token`.
pub fn find_live<'a>(tokens: &'a ResetTokens, token: &str, now: DateTime<Utc>) -> Option<&'a str> {
    tokens
        .iter()
        .find(|(_, entry)| entry.token == token && entry.is_live(now))
        .map(|(email, _)| email.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_generated_tokens_are_unique_hex() {
        let expires = Utc::now();
        let a = PasswordResetToken::generate(expires);
        let b = PasswordResetToken::generate(expires);
        assert_eq!(a.token.len(), 64);
        assert!(a.token.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_expires_at_serializes_as_millis() {
        let expires_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let token = PasswordResetToken {
            token: "t".into(),
            expires_at,
        };
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"token":"t","expiresAt":1700000000123}"#);
        assert_eq!(serde_json::from_str::<PasswordResetToken>(&json).unwrap(), token);
    }

    #[test]
    fn test_find_live_skips_expired() {
        let now = Utc::now();
        let mut tokens = ResetTokens::new();
        tokens.insert(
            "a@x.com".into(),
            PasswordResetToken {
                token: "live".into(),
                expires_at: now + Duration::minutes(5),
            },
        );
        tokens.insert(
            "b@x.com".into(),
            PasswordResetToken {
                token: "stale".into(),
                expires_at: now,
            },
        );

        assert_eq!(find_live(&tokens, "live", now), Some("a@x.com"));
        assert_eq!(find_live(&tokens, "stale", now), None);
        assert_eq!(find_live(&tokens, "unknown", now), None);
    }
}

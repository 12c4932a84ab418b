/**
 * Session Tokens
 *
 * HS256 JWTs carrying the user id in `sub`. Tokens are stateless: the
 * middleware checks the signature, the expiry and that the user still
 * exists.
 */

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: u64,
    /// Issued at time (Unix timestamp, seconds)
    pub iat: u64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    /// Signing failed
    #[error("could not issue token: {0}")]
    Issue(String),
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Expiry in epoch milliseconds
    pub expires_ms: i64,
}

/// Signing and verification keys derived from the server secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign a token for `user_id` valid for the configured lifetime
    pub fn issue(&self, user_id: Uuid) -> Result<IssuedToken, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| TokenError::Issue(e.to_string()))?
            .as_secs();
        let exp = now.saturating_add(self.ttl.as_secs());

        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            iat: now,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Issue(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_ms: i64::try_from(exp).unwrap_or(i64::MAX).saturating_mul(1000),
        })
    }

    /// Verify a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|e| TokenError::Invalid(format!("bad subject: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn keys() -> TokenKeys {
        TokenKeys::new("test-secret", Duration::from_secs(6 * 60 * 60))
    }

    #[test]
    fn test_issue_and_verify() {
        let user_id = Uuid::new_v4();
        let issued = keys().issue(user_id).unwrap();
        assert!(!issued.token.is_empty());
        assert_eq!(keys().verify(&issued.token).unwrap(), user_id);
    }

    #[test]
    fn test_expiry_is_in_milliseconds() {
        let issued = keys().issue(Uuid::new_v4()).unwrap();
        let now_ms = crate::shared::models::now_millis();
        let six_hours_ms = 6 * 60 * 60 * 1000;
        assert!(issued.expires_ms > now_ms);
        assert!(issued.expires_ms <= now_ms + six_hours_ms + 1000);
    }

    #[test]
    fn test_oversized_lifetime_saturates() {
        let keys = TokenKeys::new("test-secret", Duration::from_secs(u64::MAX));
        let issued = keys.issue(Uuid::new_v4()).unwrap();
        assert_eq!(issued.expires_ms, i64::MAX);
    }

    #[test]
    fn test_verify_invalid_token() {
        assert_matches!(keys().verify("invalid.token.here"), Err(TokenError::Invalid(_)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issued = keys().issue(Uuid::new_v4()).unwrap();
        let other = TokenKeys::new("other-secret", Duration::from_secs(60));
        assert_matches!(other.verify(&issued.token), Err(TokenError::Invalid(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_matches!(keys().verify(&token), Err(TokenError::Expired));
    }
}

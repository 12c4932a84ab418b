/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/api/user` endpoints.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::sessions::IssuedToken;
use crate::shared::error::SharedError;
use crate::shared::validation::{rule, Validate, Validator};

/// Credentials for signup and login
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Credentials {
    /// 4-16 characters
    pub username: String,
    /// 8-32 characters, hashed before storage
    pub password: String,
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .length("username", &self.username, rule::USERNAME)
            .length("password", &self.password, rule::PASSWORD)
            .finish()
    }
}

pub type SignupRequest = Credentials;
pub type LoginRequest = Credentials;

/// New password for the current user
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChangePasswordRequest {
    pub password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), SharedError> {
        Validator::new()
            .length("password", &self.password, rule::PASSWORD)
            .finish()
    }
}

/// Returned by signup and login
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    /// Token expiry in epoch milliseconds
    pub expires: i64,
}

impl AuthResponse {
    pub fn new(user_id: Uuid, issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            user_id,
            expires: issued.expires_ms,
        }
    }
}

/// Plain confirmation body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = Credentials {
            username: "alice".into(),
            password: "password123".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = Credentials {
            username: "al".into(),
            password: "x".repeat(33),
        };
        assert_eq!(bad.validate().unwrap_err().fields().len(), 2);
    }

    #[test]
    fn test_auth_response_is_camel_case() {
        let user_id = Uuid::new_v4();
        let response = AuthResponse::new(
            user_id,
            IssuedToken {
                token: "t".into(),
                expires_ms: 1_000,
            },
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userId"], user_id.to_string());
        assert_eq!(json["expires"], 1_000);
    }
}

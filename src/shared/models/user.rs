//! User documents

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::access::Owned;
use crate::shared::models::EntityKind;

/// Root of the ownership tree
///
/// The password hash is never serialized into responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Optional display name
    pub name: Option<String>,
    /// Username (unique)
    pub username: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Boards owned by this user
    pub boards: Vec<Uuid>,
    pub created_on: i64,
    pub updated_on: i64,
    /// Last successful login
    pub last_login: i64,
}

impl User {
    /// Build a fresh user with no boards
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, now: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            username: username.into(),
            password: password_hash.into(),
            boards: Vec::new(),
            created_on: now,
            updated_on: now,
            last_login: now,
        }
    }
}

impl Owned for User {
    fn kind(&self) -> EntityKind {
        EntityKind::User
    }

    fn root_user(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_not_serialized() {
        let user = User::new("alice", "$2b$04$hash", 1);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["lastLogin"], 1);
    }
}

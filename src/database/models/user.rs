use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Work factor for credentials at rest.
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never serialized to clients
    #[serde(skip_serializing)]
    pub password: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check a candidate password against the stored hash.
    pub fn verify_password(&self, candidate: &str) -> bool {
        verify(candidate, &self.password).unwrap_or(false)
    }

    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, BCRYPT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = User::hash_password("secret1").unwrap();
        assert_ne!(hashed, "secret1");

        let user = User {
            id: 1,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password: hashed,
            profile_image: None,
            created_at: Utc::now(),
        };
        assert!(user.verify_password("secret1"));
        assert!(!user.verify_password("secret2"));
    }

    #[test]
    fn serialization_omits_password() {
        let user = User {
            id: 1,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password: "$2b$10$hash".into(),
            profile_image: None,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ann@x.com");
        assert_eq!(value["profile_image"], serde_json::Value::Null);
    }
}

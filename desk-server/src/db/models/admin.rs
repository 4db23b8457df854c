//! Admin Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Admin account (前台管理员)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub username: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_role() -> String {
    "admin".to_string()
}

fn default_true() -> bool {
    true
}

/// Create admin payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreate {
    pub username: String,
    pub password: String,
}

impl Admin {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = Admin::hash_password("front-desk-2024").unwrap();
        let admin = Admin {
            id: None,
            username: "reception".to_string(),
            hash_pass: hash,
            role: "admin".to_string(),
            is_active: true,
            created_at: 0,
        };

        assert!(admin.verify_password("front-desk-2024").unwrap());
        assert!(!admin.verify_password("wrong-password").unwrap());
    }
}

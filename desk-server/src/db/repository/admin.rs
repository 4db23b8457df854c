//! Admin Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Admin, AdminCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "admin";

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find admin by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Admin>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let admin: Option<Admin> = self.base.db().select(thing).await?;
        Ok(admin)
    }

    /// Find admin by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<Admin>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM admin WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let admins: Vec<Admin> = result.take(0)?;
        Ok(admins.into_iter().next())
    }

    /// Create a new admin account (password is hashed here)
    pub async fn create(&self, data: AdminCreate) -> RepoResult<Admin> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Admin '{}' already exists",
                data.username
            )));
        }

        let hash_pass = Admin::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let admin = Admin {
            id: None,
            username: data.username,
            hash_pass,
            role: "admin".to_string(),
            is_active: true,
            created_at: shared::now_millis(),
        };

        let created: Option<Admin> = self.base.db().create(TABLE).content(admin).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create admin".to_string()))
    }
}

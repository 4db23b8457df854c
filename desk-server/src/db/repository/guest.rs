//! Guest Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Guest, GuestCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "guest";

#[derive(Clone)]
pub struct GuestRepository {
    base: BaseRepository,
}

impl GuestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all guests, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Guest>> {
        let guests: Vec<Guest> = self
            .base
            .db()
            .query("SELECT * FROM guest ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(guests)
    }

    /// Find guest by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Guest>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let guest: Option<Guest> = self.base.db().select(thing).await?;
        Ok(guest)
    }

    /// Create a new guest record
    pub async fn create(&self, data: GuestCreate) -> RepoResult<Guest> {
        let guest = Guest {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            address: data.address,
            id_proof: data.id_proof,
            created_at: shared::now_millis(),
        };

        let created: Option<Guest> = self.base.db().create(TABLE).content(guest).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create guest".to_string()))
    }
}

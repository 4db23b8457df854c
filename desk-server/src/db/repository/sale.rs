//! Sale Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::Sale;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all sale records, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query("SELECT * FROM sale ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(sales)
    }

    /// Sum of all sale amounts (gross revenue)
    pub async fn sum_amounts(&self) -> RepoResult<f64> {
        let mut result = self
            .base
            .db()
            .query("RETURN math::sum((SELECT VALUE amount FROM sale)) OR 0")
            .await?;
        let total: Option<f64> = result.take(0)?;
        Ok(total.unwrap_or(0.0))
    }
}

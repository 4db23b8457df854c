//! Database Module
//!
//! Embedded SurrealDB storage and repositories

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "hotel";
const DATABASE: &str = "frontdesk";

/// Open (or create) the embedded database at the given path
pub async fn init_database(path: &Path) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(path.to_path_buf())
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

    tracing::info!(path = %path.display(), "Database connection established (SurrealDB embedded)");

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_database_creates_store() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_database(&dir.path().join("test.db")).await.unwrap();

        let mut result = db.query("RETURN 1").await.unwrap();
        let one: Option<i64> = result.take(0).unwrap();
        assert_eq!(one, Some(1));
    }
}

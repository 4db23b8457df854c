//! Expense Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Expense, ExpenseCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "expense";

#[derive(Clone)]
pub struct ExpenseRepository {
    base: BaseRepository,
}

impl ExpenseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all expenses, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self
            .base
            .db()
            .query("SELECT * FROM expense ORDER BY date DESC")
            .await?
            .take(0)?;
        Ok(expenses)
    }

    /// Create a new expense
    pub async fn create(&self, data: ExpenseCreate, created_by: String) -> RepoResult<Expense> {
        let expense = Expense {
            id: None,
            category: data.category,
            amount: data.amount,
            description: data.description,
            date: data.date,
            created_by,
            created_at: shared::now_millis(),
        };

        let created: Option<Expense> = self.base.db().create(TABLE).content(expense).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create expense".to_string()))
    }

    /// Sum of all expense amounts
    pub async fn sum_amounts(&self) -> RepoResult<f64> {
        let mut result = self
            .base
            .db()
            .query("RETURN math::sum((SELECT VALUE amount FROM expense)) OR 0")
            .await?;
        let total: Option<f64> = result.take(0)?;
        Ok(total.unwrap_or(0.0))
    }
}

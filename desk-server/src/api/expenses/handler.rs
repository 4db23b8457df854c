//! Expense API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Expense, ExpenseCreate};
use crate::db::repository::ExpenseRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_required_text};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "expense";

/// GET /api/expenses - 支出列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Expense>>> {
    let repo = ExpenseRepository::new(state.get_db());
    let expenses = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(expenses))
}

/// POST /api/expenses - 记录支出 (created_by 取自令牌)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_amount(payload.amount, "amount")?;
    if payload.description.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("description is too long"));
    }

    let repo = ExpenseRepository::new(state.get_db());
    let expense = repo
        .create(payload, user.id)
        .await
        .map_err(AppError::from)?;

    let id = expense.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.publish_change(RESOURCE, "created", &id);

    Ok(Json(expense))
}

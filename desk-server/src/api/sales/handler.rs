//! Sale API Handlers
//!
//! 营收记录由退房转换生成，这里只读。

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::Sale;
use crate::db::repository::SaleRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/sales - 营收记录列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Sale>>> {
    let repo = SaleRepository::new(state.get_db());
    let sales = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(sales))
}

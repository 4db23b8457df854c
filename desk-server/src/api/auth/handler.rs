//! Authentication Handlers
//!
//! Handles login, account bootstrap, and current-user lookup

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Admin, AdminCreate};
use crate::db::repository::AdminRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

// Re-use shared DTOs for API consistency
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/admin/login
///
/// Authenticates admin credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = AdminRepository::new(state.get_db());
    let username = req.username.clone();

    let admin = repo
        .find_by_username(&username)
        .await
        .map_err(AppError::from)?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let admin = match admin {
        Some(a) => {
            if !a.is_active {
                return Err(AppError::forbidden("Account has been disabled".to_string()));
            }

            let password_valid = a.verify_password(&req.password).map_err(|e| {
                AppError::internal(format!("Password verification failed: {}", e))
            })?;

            if !password_valid {
                tracing::warn!(username = %username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            a
        }
        None => {
            tracing::warn!(username = %username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let admin_id = admin.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&admin_id, &admin.username, &admin.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        admin_id = %admin_id,
        username = %admin.username,
        "Admin logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: admin_id,
            username: admin.username,
            role: admin.role,
            is_active: admin.is_active,
            created_at: admin.created_at,
        },
    }))
}

/// POST /api/admin/create
///
/// Bootstrap endpoint for the first admin account; rejects duplicates.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AdminCreate>,
) -> AppResult<Json<Admin>> {
    validate_required_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&payload.password, "password", MAX_PASSWORD_LEN)?;
    if payload.password.len() < 8 {
        return Err(AppError::validation(
            "password must be at least 8 characters",
        ));
    }

    let repo = AdminRepository::new(state.get_db());
    let admin = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(username = %admin.username, "Admin account created");

    Ok(Json(admin))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    // Query fresh admin data for is_active and created_at
    let repo = AdminRepository::new(state.get_db());
    let admin = repo.find_by_id(&user.id).await.map_err(AppError::from)?;

    let (is_active, created_at) = admin
        .map(|a| (a.is_active, a.created_at))
        .unwrap_or((true, 0));

    Ok(Json(UserInfo {
        id: user.id,
        username: user.username,
        role: user.role,
        is_active,
        created_at,
    }))
}

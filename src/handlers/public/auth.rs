// handlers/public/auth.rs - Registration and token acquisition

use axum::extract::State;
use serde_json::{json, Value};

use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AccountService, LoginRequest, RegisterRequest};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Value> {
    let session = AccountService::new(state.pool(), state.tokens())
        .register(request)
        .await?;

    Ok(ApiResponse::created(json!({
        "message": "User registered successfully",
        "token": session.token,
        "user": session.profile,
    })))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Value> {
    let session = AccountService::new(state.pool(), state.tokens())
        .login(request)
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "Login successful",
        "token": session.token,
        "user": session.profile,
    })))
}

/// POST /api/auth/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Value> {
    let session = AccountService::new(state.pool(), state.tokens())
        .admin_login(request)
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "Admin login successful",
        "token": session.token,
        "admin": session.profile,
    })))
}

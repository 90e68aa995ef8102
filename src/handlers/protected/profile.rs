// handlers/protected/profile.rs - GET /api/auth/profile

use axum::Extension;
use serde_json::{json, Value};

use crate::database::models::AccountProfile;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn profile(Extension(user): Extension<AccountProfile>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "user": user })))
}

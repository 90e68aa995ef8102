// handlers/elevated/profile.rs - GET /api/auth/admin/profile

use axum::Extension;
use serde_json::{json, Value};

use crate::database::models::AdminProfile;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn admin_profile(Extension(admin): Extension<AdminProfile>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "admin": admin })))
}

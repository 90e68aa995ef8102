// handlers/elevated/dashboard.rs - GET /api/admin/dashboard

use axum::extract::State;

use crate::database::{Dashboard, DashboardRepository};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Dashboard> {
    let dashboard = DashboardRepository::new(state.pool()).snapshot().await?;
    Ok(ApiResponse::success(dashboard))
}

// handlers/elevated/orders.rs - Order listing and status transitions

use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::OrderRepository;
use crate::error::ApiError;
use crate::handlers::extract::{non_blank, JsonBody, PathParam, QueryParams};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{OrderStatus, Page, PageQuery};

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// GET /api/admin/orders
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<OrderQuery>,
) -> ApiResult<Value> {
    let status = non_blank(query.status)
        .map(|s| s.parse::<OrderStatus>())
        .transpose()
        .map_err(ApiError::bad_request)?;
    let page = Page::from(PageQuery {
        page: query.page,
        limit: query.limit,
    });

    let repo = OrderRepository::new(state.pool());
    let orders = repo.list(status, page).await?;
    let total = repo.count(status).await?;

    Ok(ApiResponse::success(json!({
        "orders": orders,
        "pagination": page.summary(total, "totalOrders"),
    })))
}

/// PUT /api/admin/orders/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> ApiResult<Value> {
    let status: OrderStatus = non_blank(update.status)
        .ok_or_else(|| ApiError::bad_request("Status is required"))?
        .parse()
        .map_err(ApiError::bad_request)?;

    let order = OrderRepository::new(state.pool())
        .update_status(id, status)
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    tracing::info!("Order {} moved to {}", order.id, status);
    Ok(ApiResponse::success(json!({
        "message": "Order status updated successfully",
        "order": order,
    })))
}

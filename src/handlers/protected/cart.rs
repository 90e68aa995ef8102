// handlers/protected/cart.rs - Cart endpoints, always scoped to the calling account

use axum::{extract::State, Extension};
use serde_json::{json, Value};

use crate::database::models::AccountProfile;
use crate::handlers::extract::{JsonBody, PathParam};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AddToCartRequest, CartService, CartSummary, UpdateCartRequest};
use crate::state::AppState;

/// GET /api/cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AccountProfile>,
) -> ApiResult<CartSummary> {
    let summary = CartService::new(state.pool()).summary(user.id).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/cart/count
pub async fn count(
    State(state): State<AppState>,
    Extension(user): Extension<AccountProfile>,
) -> ApiResult<Value> {
    let count = CartService::new(state.pool()).count(user.id).await?;
    Ok(ApiResponse::success(json!({ "count": count })))
}

/// POST /api/cart/add
///
/// 201 when a new line was created, 200 when quantity merged into an existing one.
pub async fn add_item(
    State(state): State<AppState>,
    Extension(user): Extension<AccountProfile>,
    JsonBody(request): JsonBody<AddToCartRequest>,
) -> ApiResult<Value> {
    let line = CartService::new(state.pool()).add_item(user.id, request).await?;

    if line.inserted {
        Ok(ApiResponse::created(json!({
            "message": "Item added to cart successfully",
            "cartItem": line,
        })))
    } else {
        Ok(ApiResponse::success(json!({
            "message": "Cart updated successfully",
            "cartItem": line,
        })))
    }
}

/// PUT /api/cart/update/:id
pub async fn update_item(
    State(state): State<AppState>,
    Extension(user): Extension<AccountProfile>,
    PathParam(id): PathParam<i32>,
    JsonBody(request): JsonBody<UpdateCartRequest>,
) -> ApiResult<Value> {
    let line = CartService::new(state.pool())
        .update_item(user.id, id, request)
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "Cart updated successfully",
        "cartItem": line,
    })))
}

/// DELETE /api/cart/remove/:id
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(user): Extension<AccountProfile>,
    PathParam(id): PathParam<i32>,
) -> ApiResult<Value> {
    CartService::new(state.pool()).remove_item(user.id, id).await?;
    Ok(ApiResponse::success(json!({ "message": "Item removed from cart successfully" })))
}

/// DELETE /api/cart/clear
pub async fn clear(
    State(state): State<AppState>,
    Extension(user): Extension<AccountProfile>,
) -> ApiResult<Value> {
    let removed = CartService::new(state.pool()).clear(user.id).await?;
    tracing::debug!("Cleared {} cart lines for user {}", removed, user.id);
    Ok(ApiResponse::success(json!({ "message": "Cart cleared successfully" })))
}

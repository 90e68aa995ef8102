// handlers/elevated/products.rs - Product administration (active and inactive)

use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{ProductFilter, ProductInput};
use crate::database::ProductRepository;
use crate::error::ApiError;
use crate::handlers::extract::{non_blank, JsonBody, PathParam, QueryParams};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Page, PageQuery};

#[derive(Debug, Deserialize)]
pub struct AdminProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

fn product_not_found() -> ApiError {
    ApiError::not_found("Product not found")
}

/// GET /api/admin/products
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AdminProductQuery>,
) -> ApiResult<Value> {
    let page = Page::from(PageQuery {
        page: query.page,
        limit: query.limit,
    });
    let filter = ProductFilter {
        active_only: false,
        category: non_blank(query.category),
        search: non_blank(query.search),
    };

    let repo = ProductRepository::new(state.pool());
    let products = repo.list(&filter, page).await?;
    let total = repo.count(&filter).await?;

    Ok(ApiResponse::success(json!({
        "products": products,
        "pagination": page.summary(total, "totalProducts"),
    })))
}

/// POST /api/admin/products
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ApiResult<Value> {
    input.validate().map_err(ApiError::bad_request)?;

    let product = ProductRepository::new(state.pool()).create(&input).await?;
    tracing::info!("Created product {} ({})", product.id, product.name);

    Ok(ApiResponse::created(json!({
        "message": "Product created successfully",
        "product": product,
    })))
}

/// PUT /api/admin/products/:id
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ApiResult<Value> {
    input.validate().map_err(ApiError::bad_request)?;

    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await?
        .ok_or_else(product_not_found)?;

    Ok(ApiResponse::success(json!({
        "message": "Product updated successfully",
        "product": product,
    })))
}

/// PUT /api/admin/products/:id/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> ApiResult<Value> {
    let product = ProductRepository::new(state.pool())
        .toggle_status(id)
        .await?
        .ok_or_else(product_not_found)?;

    let message = if product.is_active {
        "Product activated successfully"
    } else {
        "Product deactivated successfully"
    };

    Ok(ApiResponse::success(json!({
        "message": message,
        "product": product,
    })))
}

/// DELETE /api/admin/products/:id
///
/// Cart lines referencing the product are removed in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> ApiResult<Value> {
    let removed_lines = ProductRepository::new(state.pool())
        .delete_with_cart_lines(id)
        .await?
        .ok_or_else(product_not_found)?;

    tracing::info!("Deleted product {} and {} cart lines", id, removed_lines);
    Ok(ApiResponse::success(json!({ "message": "Product deleted successfully" })))
}

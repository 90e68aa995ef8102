// handlers/public/products.rs - Catalog browsing; inactive products are invisible here

use axum::extract::State;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::ProductFilter;
use crate::database::ProductRepository;
use crate::error::ApiError;
use crate::handlers::extract::{non_blank, PathParam, QueryParams};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Page, PageQuery};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebrateQuery {
    pub price_filter: Option<String>,
}

/// Upper price bound for a celebrate filter; `all` and unknown filters are unbounded
fn price_ceiling(filter: &str) -> Option<Decimal> {
    match filter {
        "20k" => Some(Decimal::from(20_000)),
        "30k" => Some(Decimal::from(30_000)),
        "40k" => Some(Decimal::from(40_000)),
        "50k" => Some(Decimal::from(50_000)),
        "1lac" => Some(Decimal::from(100_000)),
        _ => None,
    }
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CatalogQuery>,
) -> ApiResult<Value> {
    let page = Page::from(PageQuery {
        page: query.page,
        limit: query.limit,
    });
    let filter = ProductFilter {
        active_only: true,
        category: non_blank(query.category),
        search: None,
    };

    let repo = ProductRepository::new(state.pool());
    let products = repo.list(&filter, page).await?;
    let total = repo.count(&filter).await?;

    Ok(ApiResponse::success(json!({
        "products": products,
        "pagination": page.summary(total, "totalProducts"),
    })))
}

/// GET /api/products/new-arrivals
pub async fn new_arrivals(State(state): State<AppState>) -> ApiResult<Value> {
    let products = ProductRepository::new(state.pool()).new_arrivals().await?;
    Ok(ApiResponse::success(json!({ "products": products })))
}

/// GET /api/products/celebrate
pub async fn celebrate(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CelebrateQuery>,
) -> ApiResult<Value> {
    let ceiling = query.price_filter.as_deref().and_then(price_ceiling);
    let products = ProductRepository::new(state.pool()).celebrate(ceiling).await?;
    Ok(ApiResponse::success(json!({ "products": products })))
}

/// GET /api/products/categories/list
pub async fn categories(State(state): State<AppState>) -> ApiResult<Value> {
    let categories = ProductRepository::new(state.pool()).categories().await?;
    Ok(ApiResponse::success(json!({ "categories": categories })))
}

/// GET /api/products/:id
pub async fn get(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> ApiResult<Value> {
    let product = ProductRepository::new(state.pool())
        .find_active(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(ApiResponse::success(json!({ "product": product })))
}

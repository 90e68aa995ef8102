use axum::{
    http::{header, HeaderValue},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{require_identity, AdminNamespace, CustomerNamespace};
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(public::system::health))
        .merge(public_routes())
        .merge(customer_routes(state.clone()))
        .merge(admin_routes(state.clone()));

    Router::new()
        .route("/", get(public::system::root))
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(cors_layer(&state.config().security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{auth, products};

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/admin/login", post(auth::admin_login))
        .route("/products", get(products::list))
        .route("/products/new-arrivals", get(products::new_arrivals))
        .route("/products/celebrate", get(products::celebrate))
        .route("/products/categories/list", get(products::categories))
        .route("/products/:id", get(products::get))
}

fn customer_routes(state: AppState) -> Router<AppState> {
    use protected::{cart, profile};

    Router::new()
        .route("/auth/profile", get(profile::profile))
        .route("/cart", get(cart::get_cart))
        .route("/cart/count", get(cart::count))
        .route("/cart/add", post(cart::add_item))
        .route("/cart/update/:id", put(cart::update_item))
        .route("/cart/remove/:id", delete(cart::remove_item))
        .route("/cart/clear", delete(cart::clear))
        .route_layer(from_fn_with_state(state, require_identity::<CustomerNamespace>))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use elevated::{dashboard, orders, products, profile};

    Router::new()
        .route("/auth/admin/profile", get(profile::admin_profile))
        .route("/admin/dashboard", get(dashboard::dashboard))
        .route("/admin/products", get(products::list).post(products::create))
        .route("/admin/products/:id", put(products::update).delete(products::delete))
        .route("/admin/products/:id/toggle-status", put(products::toggle_status))
        .route("/admin/orders", get(orders::list))
        .route("/admin/orders/:id/status", put(orders::update_status))
        .route_layer(from_fn_with_state(state, require_identity::<AdminNamespace>))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

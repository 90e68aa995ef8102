use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::de::DeserializeOwned;
use sqlx::PgPool;

use crate::auth::{AdminClaims, CustomerClaims};
use crate::database::models::{AccountProfile, AdminProfile};
use crate::database::{AccountRepository, AdminRepository, DatabaseError};
use crate::error::ApiError;
use crate::state::AppState;

/// One identity space a bearer token can belong to.
///
/// Each namespace decodes its own claims type and resolves the subject
/// against its own table, so a token from one space never authenticates
/// in the other.
#[async_trait]
pub trait IdentityNamespace: Send + Sync + 'static {
    type Claims: DeserializeOwned + Send + Sync;
    /// Attached to request extensions on success
    type Identity: Clone + Send + Sync + 'static;

    const LABEL: &'static str;
    /// 403 message when the token fails verification
    const INVALID_CREDENTIAL: &'static str;
    /// 401 message when the token's subject no longer exists
    const UNKNOWN_SUBJECT: &'static str;

    async fn resolve(
        pool: &PgPool,
        claims: &Self::Claims,
    ) -> Result<Option<Self::Identity>, DatabaseError>;
}

pub struct CustomerNamespace;

pub struct AdminNamespace;

#[async_trait]
impl IdentityNamespace for CustomerNamespace {
    type Claims = CustomerClaims;
    type Identity = AccountProfile;

    const LABEL: &'static str = "customer";
    const INVALID_CREDENTIAL: &'static str = "Invalid or expired token";
    const UNKNOWN_SUBJECT: &'static str = "Invalid token";

    async fn resolve(
        pool: &PgPool,
        claims: &CustomerClaims,
    ) -> Result<Option<AccountProfile>, DatabaseError> {
        AccountRepository::new(pool).find_profile(claims.user_id).await
    }
}

#[async_trait]
impl IdentityNamespace for AdminNamespace {
    type Claims = AdminClaims;
    type Identity = AdminProfile;

    const LABEL: &'static str = "admin";
    const INVALID_CREDENTIAL: &'static str = "Invalid or expired admin token";
    const UNKNOWN_SUBJECT: &'static str = "Invalid admin token";

    async fn resolve(
        pool: &PgPool,
        claims: &AdminClaims,
    ) -> Result<Option<AdminProfile>, DatabaseError> {
        AdminRepository::new(pool).find_profile(claims.admin_id).await
    }
}

/// Token portion of `Authorization: Bearer <token>`.
///
/// Only the second whitespace-separated word is taken; the scheme word
/// itself is not checked.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}

/// Gate for routes that require an identity from namespace `N`.
///
/// Verifies the bearer token, re-reads the subject from the database and
/// attaches `N::Identity` to the request. Rejected requests never reach the
/// handler.
pub async fn require_identity<N: IdentityNamespace>(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::unauthorized("Access token required"))?;

    let claims: N::Claims = state.tokens().verify(&token).map_err(|_| {
        tracing::warn!("Rejected {} token for {} {}", N::LABEL, request.method(), request.uri().path());
        ApiError::forbidden(N::INVALID_CREDENTIAL)
    })?;

    let identity = N::resolve(state.pool(), &claims)
        .await?
        .ok_or_else(|| {
            tracing::warn!("{} token subject no longer exists", N::LABEL);
            ApiError::unauthorized(N::UNKNOWN_SUBJECT)
        })?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

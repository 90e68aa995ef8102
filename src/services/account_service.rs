use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{hash_password, verify_password, AuthError, TokenKeys};
use crate::database::models::{AccountProfile, AdminProfile, NewAccount};
use crate::database::{AccountRepository, AdminRepository, DatabaseError};
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error("User already exists")]
    AlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Invalid(_) | AccountError::AlreadyExists => {
                ApiError::bad_request(err.to_string())
            }
            AccountError::InvalidCredentials | AccountError::InvalidAdminCredentials => {
                ApiError::unauthorized(err.to_string())
            }
            AccountError::Auth(e) => e.into(),
            AccountError::Database(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Issued token plus the identity it names
#[derive(Debug, Serialize)]
pub struct Session<P> {
    pub token: String,
    pub profile: P,
}

fn present(value: Option<String>, message: &'static str) -> Result<String, AccountError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AccountError::Invalid(message)),
    }
}

impl RegisterRequest {
    fn into_parts(self) -> Result<(NewAccount, String), AccountError> {
        let email = present(self.email, "Email is required")?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(AccountError::Invalid("Password is required"))?;
        let first_name = present(self.first_name, "First name is required")?;
        let last_name = present(self.last_name, "Last name is required")?;

        let account = NewAccount {
            email,
            password_hash: String::new(),
            first_name,
            last_name,
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            address: self.address.filter(|a| !a.trim().is_empty()),
        };
        Ok((account, password))
    }
}

/// Registration and login for both identity namespaces
pub struct AccountService<'a> {
    accounts: AccountRepository<'a>,
    admins: AdminRepository<'a>,
    tokens: &'a TokenKeys,
}

impl<'a> AccountService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenKeys) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
            admins: AdminRepository::new(pool),
            tokens,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<Session<AccountProfile>, AccountError> {
        let (mut account, password) = request.into_parts()?;
        account.password_hash = hash_password(&password)?;

        let profile = match self.accounts.create(&account).await {
            Ok(profile) => profile,
            Err(DatabaseError::Conflict(_)) => return Err(AccountError::AlreadyExists),
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Registered customer {}", profile.id);
        let token = self.tokens.issue(&self.tokens.customer_claims(profile.id, &profile.email))?;
        Ok(Session { token, profile })
    }

    /// Unknown email and wrong password are reported identically
    pub async fn login(&self, request: LoginRequest) -> Result<Session<AccountProfile>, AccountError> {
        let (email, password) = match (request.email, request.password) {
            (Some(email), Some(password)) => (email, password),
            _ => return Err(AccountError::InvalidCredentials),
        };

        let account = self
            .accounts
            .find_by_email(email.trim())
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        verify_password(&password, &account.password_hash)
            .map_err(|_| AccountError::InvalidCredentials)?;

        let profile = AccountProfile::from(&account);
        let token = self.tokens.issue(&self.tokens.customer_claims(profile.id, &profile.email))?;
        Ok(Session { token, profile })
    }

    pub async fn admin_login(&self, request: LoginRequest) -> Result<Session<AdminProfile>, AccountError> {
        let (email, password) = match (request.email, request.password) {
            (Some(email), Some(password)) => (email, password),
            _ => return Err(AccountError::InvalidAdminCredentials),
        };

        let admin = self
            .admins
            .find_by_email(email.trim())
            .await?
            .ok_or(AccountError::InvalidAdminCredentials)?;

        verify_password(&password, &admin.password_hash)
            .map_err(|_| AccountError::InvalidAdminCredentials)?;

        let profile = AdminProfile::from(&admin);
        let claims = self.tokens.admin_claims(profile.id, &profile.email, &profile.role);
        let token = self.tokens.issue(&claims)?;
        tracing::info!("Admin {} logged in", profile.id);
        Ok(Session { token, profile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn request(email: &str, password: &str, first: &str, last: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            phone: Some("  ".to_string()),
            address: None,
        }
    }

    #[test]
    fn register_requires_every_identity_field() {
        let err = request("", "pw", "A", "B").into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
        let err = request("a@example.com", "", "A", "B").into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Password is required");
        let err = request("a@example.com", "pw", "A", " ").into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Last name is required");
    }

    #[test]
    fn register_trims_and_drops_blank_optionals() {
        let (account, password) = request(" a@example.com ", "pw", "Asha", "Rao").into_parts().unwrap();
        assert_eq!(account.email, "a@example.com");
        assert_eq!(password, "pw");
        assert!(account.phone.is_none());
    }

    #[test]
    fn errors_map_to_expected_statuses() {
        let err: ApiError = AccountError::AlreadyExists.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "User already exists");

        let err: ApiError = AccountError::InvalidAdminCredentials.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid admin credentials");
    }
}

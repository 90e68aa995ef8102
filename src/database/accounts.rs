//! Customer account queries.

use sqlx::PgPool;

use super::models::{Account, AccountProfile, NewAccount};
use super::DatabaseError;

pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Full row including the password hash, for login
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DatabaseError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(account)
    }

    /// Non-secret columns only; used by the customer verifier on every request
    pub async fn find_profile(&self, id: i32) -> Result<Option<AccountProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, AccountProfile>(
            "SELECT id, email, first_name, last_name FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(profile)
    }

    /// Insert a new customer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` when the email is already registered.
    pub async fn create(&self, account: &NewAccount) -> Result<AccountProfile, DatabaseError> {
        let result = sqlx::query_as::<_, AccountProfile>(
            r#"
            INSERT INTO users (email, password, first_name, last_name, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, first_name, last_name
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.phone)
        .bind(&account.address)
        .fetch_one(self.pool)
        .await
        .map_err(DatabaseError::from);

        match result {
            Err(e) if e.is_unique_violation() => {
                Err(DatabaseError::Conflict("User already exists".to_string()))
            }
            other => other,
        }
    }
}

//! Admin account queries. Admins never share a table with customers.

use sqlx::PgPool;

use super::models::{AdminAccount, AdminProfile};
use super::DatabaseError;

pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, DatabaseError> {
        let admin = sqlx::query_as::<_, AdminAccount>(
            "SELECT id, email, password, name, role FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;
        Ok(admin)
    }

    pub async fn find_profile(&self, id: i32) -> Result<Option<AdminProfile>, DatabaseError> {
        let profile = sqlx::query_as::<_, AdminProfile>(
            "SELECT id, email, name, role FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(profile)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` when an admin with this email exists.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        role: &str,
    ) -> Result<AdminProfile, DatabaseError> {
        let result = sqlx::query_as::<_, AdminProfile>(
            r#"
            INSERT INTO admins (email, password, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(DatabaseError::from);

        match result {
            Err(e) if e.is_unique_violation() => {
                Err(DatabaseError::Conflict(format!("Admin {} already exists", email)))
            }
            other => other,
        }
    }
}

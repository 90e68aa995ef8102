use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct AdminAccount {
    pub id: i32,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub name: String,
    pub role: String,
}

/// Non-secret admin columns, attached to admin-authenticated requests
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminProfile {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&AdminAccount> for AdminProfile {
    fn from(admin: &AdminAccount) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role.clone(),
        }
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i32,
    pub user_id: Option<i32>,
    pub total_amount: Decimal,
    pub status: String,
    pub shipping_address: String,
    pub billing_address: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order joined with the ordering customer's name and email
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderWithCustomer {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

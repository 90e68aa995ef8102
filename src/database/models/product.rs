use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub images: Json<Vec<String>>,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin create/update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
}

impl ProductInput {
    /// Check the fields every stored product needs, returning a client message on failure
    pub fn validate(&self) -> Result<(), String> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {}
            _ => return Err("Product name is required".to_string()),
        }
        match self.price {
            Some(price) if price >= Decimal::ZERO => {}
            Some(_) => return Err("Price cannot be negative".to_string()),
            None => return Err("Price is required".to_string()),
        }
        if matches!(self.stock_quantity, Some(q) if q < 0) {
            return Err("Stock quantity cannot be negative".to_string());
        }
        Ok(())
    }
}

/// Catalog listing filter
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub active_only: bool,
    pub category: Option<String>,
    pub search: Option<String>,
}

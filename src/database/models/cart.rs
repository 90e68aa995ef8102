use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// The (size, color) selectors that distinguish cart lines for one product.
///
/// Blank selectors are stored as NULL so that "no size" always matches "no size".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartVariant {
    pub size: Option<String>,
    pub color: Option<String>,
}

impl CartVariant {
    pub fn new(size: Option<String>, color: Option<String>) -> Self {
        Self {
            size: normalize(size),
            color: normalize(color),
        }
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Result of the atomic insert-or-merge
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLineUpsert {
    pub id: i32,
    pub quantity: i32,
    #[serde(skip)]
    pub inserted: bool,
}

/// Current stock and the quantity already held for one cart key
#[derive(Debug, Clone, FromRow)]
pub struct StockHeadroom {
    pub stock_quantity: i32,
    pub in_cart: Option<i32>,
}

impl StockHeadroom {
    pub fn available(&self) -> i32 {
        (self.stock_quantity - self.in_cart.unwrap_or(0)).max(0)
    }
}

/// Cart line joined with its product, as returned by `GET /cart`
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Pre-discount list price shown struck through; 20% above `price`
    pub original_price: Decimal,
    pub images: Json<Vec<String>>,
    pub stock_quantity: i32,
    pub category: Option<String>,
    pub material: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i32,
    #[serde(rename = "addedAt")]
    pub created_at: DateTime<Utc>,
}

impl CartItemView {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_selectors_collapse_to_none() {
        let variant = CartVariant::new(Some("  ".into()), Some("".into()));
        assert_eq!(variant, CartVariant::default());
    }

    #[test]
    fn selectors_are_trimmed() {
        let variant = CartVariant::new(Some(" Free Size ".into()), Some("Maroon".into()));
        assert_eq!(variant.size.as_deref(), Some("Free Size"));
        assert_eq!(variant.color.as_deref(), Some("Maroon"));
    }

    #[test]
    fn headroom_never_negative() {
        let h = StockHeadroom { stock_quantity: 10, in_cart: Some(8) };
        assert_eq!(h.available(), 2);
        let h = StockHeadroom { stock_quantity: 3, in_cart: Some(5) };
        assert_eq!(h.available(), 0);
        let h = StockHeadroom { stock_quantity: 4, in_cart: None };
        assert_eq!(h.available(), 4);
    }
}

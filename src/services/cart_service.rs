//! Cart reconciliation: add, update, remove and clear lines for one account.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::{CartItemView, CartLineUpsert, CartVariant};
use crate::database::{CartRepository, DatabaseError, ProductRepository};
use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Product ID is required")]
    MissingProduct,
    #[error("{0}")]
    InvalidQuantity(&'static str),
    #[error("Product not found")]
    ProductNotFound,
    #[error("Cart item not found")]
    LineNotFound,
    #[error("Only {0} items available in stock")]
    InsufficientStock(i32),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::MissingProduct
            | CartError::InvalidQuantity(_)
            | CartError::InsufficientStock(_) => ApiError::bad_request(err.to_string()),
            CartError::ProductNotFound | CartError::LineNotFound => {
                ApiError::not_found(err.to_string())
            }
            CartError::Database(e) => e.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
    pub size: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart_items: Vec<CartItemView>,
    pub total_amount: Decimal,
    pub item_count: i64,
}

impl CartSummary {
    fn from_items(cart_items: Vec<CartItemView>) -> Self {
        let total_amount = cart_items.iter().map(CartItemView::line_total).sum();
        let item_count = cart_items.iter().map(|item| i64::from(item.quantity)).sum();
        Self {
            cart_items,
            total_amount,
            item_count,
        }
    }
}

/// Quantity for an add request; omitted means one
fn add_quantity(requested: Option<i32>) -> Result<i32, CartError> {
    match requested {
        None => Ok(1),
        Some(q) if q >= 1 => Ok(q),
        Some(_) => Err(CartError::InvalidQuantity("Quantity must be at least 1")),
    }
}

/// Quantity for an update request; must be present and positive
fn update_quantity(requested: Option<i32>) -> Result<i32, CartError> {
    match requested {
        Some(q) if q >= 1 => Ok(q),
        _ => Err(CartError::InvalidQuantity("Valid quantity is required")),
    }
}

pub struct CartService<'a> {
    cart: CartRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            cart: CartRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    pub async fn summary(&self, user_id: i32) -> Result<CartSummary, CartError> {
        let items = self.cart.list_for_user(user_id).await?;
        Ok(CartSummary::from_items(items))
    }

    pub async fn count(&self, user_id: i32) -> Result<i64, CartError> {
        Ok(self.cart.count(user_id).await?)
    }

    /// Add `quantity` of a product variant, merging into an existing line.
    ///
    /// At most one line exists per (account, product, size, color). A merge
    /// that would exceed stock fails and leaves the existing line unchanged.
    pub async fn add_item(&self, user_id: i32, request: AddToCartRequest) -> Result<CartLineUpsert, CartError> {
        let product_id = request.product_id.ok_or(CartError::MissingProduct)?;
        let quantity = add_quantity(request.quantity)?;

        let product = self
            .products
            .find_active(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        if quantity > product.stock_quantity {
            return Err(CartError::InsufficientStock(product.stock_quantity));
        }

        let variant = CartVariant::new(request.size, request.color);

        if let Some(line) = self.cart.upsert_line(user_id, product_id, quantity, &variant).await? {
            tracing::debug!(
                "Cart line {} for user {} now holds {} (inserted: {})",
                line.id,
                user_id,
                line.quantity,
                line.inserted
            );
            return Ok(line);
        }

        // The guarded upsert wrote nothing; report what is left to add.
        let headroom = self
            .cart
            .headroom(user_id, product_id, &variant)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        Err(CartError::InsufficientStock(headroom.available()))
    }

    pub async fn update_item(
        &self,
        user_id: i32,
        line_id: i32,
        request: UpdateCartRequest,
    ) -> Result<CartLineUpsert, CartError> {
        let quantity = update_quantity(request.quantity)?;

        if let Some(line) = self.cart.update_quantity(user_id, line_id, quantity).await? {
            return Ok(line);
        }

        match self.cart.find_owned_stock(user_id, line_id).await? {
            Some(stock) => Err(CartError::InsufficientStock(stock)),
            None => Err(CartError::LineNotFound),
        }
    }

    pub async fn remove_item(&self, user_id: i32, line_id: i32) -> Result<(), CartError> {
        if self.cart.delete_owned(user_id, line_id).await? {
            Ok(())
        } else {
            Err(CartError::LineNotFound)
        }
    }

    pub async fn clear(&self, user_id: i32) -> Result<u64, CartError> {
        Ok(self.cart.clear(user_id).await?)
    }
}

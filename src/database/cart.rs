//! Cart line queries.
//!
//! Every statement is scoped by the owning account id, so a line belonging to
//! someone else behaves exactly like a line that does not exist.

use sqlx::PgPool;

use super::models::{CartItemView, CartLineUpsert, CartVariant, StockHeadroom};
use super::DatabaseError;

pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a line or merge `quantity` into the existing line for the same
    /// (account, product, size, color) key, in one statement.
    ///
    /// The stock ceiling is checked inside the statement: a new line needs
    /// `stock >= quantity`, a merge needs `existing + quantity <= stock`.
    /// The merge sum is compared as bigint so it cannot overflow int4.
    /// Returns `None` when either guard fails (or the product is inactive),
    /// leaving any existing line untouched.
    pub async fn upsert_line(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
        variant: &CartVariant,
    ) -> Result<Option<CartLineUpsert>, DatabaseError> {
        let line = sqlx::query_as::<_, CartLineUpsert>(
            r#"
            INSERT INTO cart (user_id, product_id, quantity, size, color)
            SELECT $1, p.id, $3, $4, $5
            FROM products p
            WHERE p.id = $2 AND p.is_active = true AND p.stock_quantity >= $3
            ON CONFLICT (user_id, product_id, (COALESCE(size, '')), (COALESCE(color, '')))
            DO UPDATE SET
                quantity = cart.quantity + EXCLUDED.quantity,
                updated_at = NOW()
            WHERE cart.quantity::bigint + EXCLUDED.quantity <= (
                SELECT stock_quantity FROM products WHERE id = EXCLUDED.product_id
            )
            RETURNING id, quantity, (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(&variant.size)
        .bind(&variant.color)
        .fetch_optional(self.pool)
        .await?;
        Ok(line)
    }

    /// Current stock and the quantity already in the account's line for this key.
    ///
    /// `None` when the product no longer exists or is inactive.
    pub async fn headroom(
        &self,
        user_id: i32,
        product_id: i32,
        variant: &CartVariant,
    ) -> Result<Option<StockHeadroom>, DatabaseError> {
        let headroom = sqlx::query_as::<_, StockHeadroom>(
            r#"
            SELECT p.stock_quantity, c.quantity AS in_cart
            FROM products p
            LEFT JOIN cart c
                ON c.product_id = p.id
               AND c.user_id = $1
               AND COALESCE(c.size, '') = COALESCE($3, '')
               AND COALESCE(c.color, '') = COALESCE($4, '')
            WHERE p.id = $2 AND p.is_active = true
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(&variant.size)
        .bind(&variant.color)
        .fetch_optional(self.pool)
        .await?;
        Ok(headroom)
    }

    /// Lines whose product is still active, newest first
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<CartItemView>, DatabaseError> {
        let items = sqlx::query_as::<_, CartItemView>(
            r#"
            SELECT
                c.id, c.product_id, p.name, p.description, p.price,
                ROUND(p.price * 1.2, 2) AS original_price, p.images,
                p.stock_quantity, p.category, p.material,
                c.size, c.color, c.quantity, c.created_at
            FROM cart c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = $1 AND p.is_active = true
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }

    /// Overwrite an owned line's quantity if the product has enough stock.
    ///
    /// Returns `None` when the line is not owned or stock is short; use
    /// [`Self::find_owned_stock`] to tell the two apart.
    pub async fn update_quantity(
        &self,
        user_id: i32,
        line_id: i32,
        quantity: i32,
    ) -> Result<Option<CartLineUpsert>, DatabaseError> {
        let line = sqlx::query_as::<_, CartLineUpsert>(
            r#"
            UPDATE cart c SET quantity = $3, updated_at = NOW()
            FROM products p
            WHERE c.id = $1 AND c.user_id = $2
              AND p.id = c.product_id AND p.stock_quantity >= $3
            RETURNING c.id, c.quantity, false AS inserted
            "#,
        )
        .bind(line_id)
        .bind(user_id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;
        Ok(line)
    }

    /// Stock of the product behind an owned line
    pub async fn find_owned_stock(&self, user_id: i32, line_id: i32) -> Result<Option<i32>, DatabaseError> {
        let stock = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT p.stock_quantity
            FROM cart c
            JOIN products p ON p.id = c.product_id
            WHERE c.id = $1 AND c.user_id = $2
            "#,
        )
        .bind(line_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(stock)
    }

    /// Returns false when no owned line matched
    pub async fn delete_owned(&self, user_id: i32, line_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM cart WHERE id = $1 AND user_id = $2")
            .bind(line_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn clear(&self, user_id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of visible lines, consistent with [`Self::list_for_user`]
    pub async fn count(&self, user_id: i32) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM cart c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = $1 AND p.is_active = true
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}

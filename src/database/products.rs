//! Product catalog queries, shared by the public catalog and admin CRUD.

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{Product, ProductFilter, ProductInput};
use super::DatabaseError;
use crate::types::Page;

const NEW_ARRIVALS_LIMIT: i64 = 4;
const CELEBRATE_LIMIT: i64 = 8;

pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE TRUE");

    if filter.active_only {
        builder.push(" AND is_active = true");
    }
    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of products matching `filter`, newest first
    pub async fn list(&self, filter: &ProductFilter, page: Page) -> Result<Vec<Product>, DatabaseError> {
        let mut builder = QueryBuilder::new("SELECT * FROM products");
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let products = builder.build_query_as::<Product>().fetch_all(self.pool).await?;
        Ok(products)
    }

    pub async fn count(&self, filter: &ProductFilter) -> Result<i64, DatabaseError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filter(&mut builder, filter);

        let total: i64 = builder.build_query_scalar::<i64>().fetch_one(self.pool).await?;
        Ok(total)
    }

    /// Any product, active or not (admin view)
    pub async fn find(&self, id: i32) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    /// Active products only; inactive ones are invisible to customers
    pub async fn find_active(&self, id: i32) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }

    pub async fn new_arrivals(&self) -> Result<Vec<Product>, DatabaseError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE is_active = true ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(NEW_ARRIVALS_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(products)
    }

    /// Featured products priced at or below `max_price` (no bound when `None`)
    pub async fn celebrate(&self, max_price: Option<Decimal>) -> Result<Vec<Product>, DatabaseError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE is_active = true AND ($1::numeric IS NULL OR price <= $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(max_price)
        .bind(CELEBRATE_LIMIT)
        .fetch_all(self.pool)
        .await?;
        Ok(products)
    }

    pub async fn categories(&self) -> Result<Vec<String>, DatabaseError> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category FROM products
            WHERE is_active = true AND category IS NOT NULL
            ORDER BY category
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(categories)
    }

    /// Insert a validated product; new products are active unless told otherwise
    pub async fn create(&self, input: &ProductInput) -> Result<Product, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, description, price, category, size, color, material, images, stock_quantity, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(&input.size)
        .bind(&input.color)
        .bind(&input.material)
        .bind(Json(input.images.clone().unwrap_or_default()))
        .bind(input.stock_quantity.unwrap_or(0))
        .bind(input.is_active.unwrap_or(true))
        .fetch_one(self.pool)
        .await?;
        Ok(product)
    }

    /// Replace a product's descriptive fields.
    ///
    /// Images, stock and the active flag keep their stored values when omitted.
    pub async fn update(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = $1,
                description = $2,
                price = $3,
                category = $4,
                size = $5,
                color = $6,
                material = $7,
                images = COALESCE($8, images),
                stock_quantity = COALESCE($9, stock_quantity),
                is_active = COALESCE($10, is_active),
                updated_at = NOW()
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.category)
        .bind(&input.size)
        .bind(&input.color)
        .bind(&input.material)
        .bind(input.images.clone().map(Json))
        .bind(input.stock_quantity)
        .bind(input.is_active)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }

    /// Flip the active flag in place
    pub async fn toggle_status(&self, id: i32) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET is_active = NOT is_active, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }

    /// Delete a product after removing every cart line that references it.
    ///
    /// Both deletes commit together; returns the number of cart lines removed,
    /// or `None` if the product did not exist.
    pub async fn delete_with_cart_lines(&self, id: i32) -> Result<Option<u64>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM cart WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(removed))
    }
}

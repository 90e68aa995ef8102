//! Order queries for the admin console. Orders are created elsewhere.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{Order, OrderWithCustomer};
use super::DatabaseError;
use crate::types::{OrderStatus, Page};

pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

fn push_status(builder: &mut QueryBuilder<'_, Postgres>, status: Option<OrderStatus>) {
    if let Some(status) = status {
        builder.push(" WHERE o.status = ").push_bind(status.as_str());
    }
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        page: Page,
    ) -> Result<Vec<OrderWithCustomer>, DatabaseError> {
        let mut builder = QueryBuilder::new(
            "SELECT o.*, u.first_name, u.last_name, u.email FROM orders o JOIN users u ON u.id = o.user_id",
        );
        push_status(&mut builder, status);
        builder
            .push(" ORDER BY o.created_at DESC, o.id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let orders = builder
            .build_query_as::<OrderWithCustomer>()
            .fetch_all(self.pool)
            .await?;
        Ok(orders)
    }

    /// Counted over the same join as [`Self::list`] so the pages add up
    pub async fn count(&self, status: Option<OrderStatus>) -> Result<i64, DatabaseError> {
        let mut builder =
            QueryBuilder::new("SELECT COUNT(*) FROM orders o JOIN users u ON u.id = o.user_id");
        push_status(&mut builder, status);

        let total = builder.build_query_scalar::<i64>().fetch_one(self.pool).await?;
        Ok(total)
    }

    pub async fn update_status(&self, id: i32, status: OrderStatus) -> Result<Option<Order>, DatabaseError> {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(order)
    }
}

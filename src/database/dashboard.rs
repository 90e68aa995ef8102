//! Admin dashboard aggregates.
//!
//! All three reads run in one read-only REPEATABLE READ transaction, so the
//! figures describe a single snapshot. They are still only a point-in-time
//! view: nothing stops writes landing right after the snapshot is taken.

use serde::Serialize;
use sqlx::PgPool;

use super::models::{DashboardStats, OrderStatusCount, OrderWithCustomer};
use super::DatabaseError;

const RECENT_ORDERS_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub orders_by_status: Vec<OrderStatusCount>,
    pub recent_orders: Vec<OrderWithCustomer>,
}

pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn snapshot(&self) -> Result<Dashboard, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let stats = sqlx::query_as::<_, DashboardStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE is_active = true) AS active_products,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COALESCE(SUM(total_amount), 0) FROM orders
                  WHERE status <> 'cancelled') AS total_revenue,
                (SELECT COALESCE(SUM(total_amount), 0) FROM orders
                  WHERE status <> 'cancelled'
                    AND date_trunc('month', created_at) = date_trunc('month', NOW())) AS monthly_revenue
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let orders_by_status = sqlx::query_as::<_, OrderStatusCount>(
            "SELECT status, COUNT(*) AS count FROM orders GROUP BY status ORDER BY status",
        )
        .fetch_all(&mut *tx)
        .await?;

        let recent_orders = sqlx::query_as::<_, OrderWithCustomer>(
            r#"
            SELECT o.*, u.first_name, u.last_name, u.email
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ORDER BY o.created_at DESC, o.id DESC
            LIMIT $1
            "#,
        )
        .bind(RECENT_ORDERS_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Dashboard {
            stats,
            orders_by_status,
            recent_orders,
        })
    }
}

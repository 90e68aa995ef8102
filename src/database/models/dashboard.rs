use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_products: i64,
    pub active_products: i64,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub monthly_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderStatusCount {
    pub status: String,
    pub count: i64,
}

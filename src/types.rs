//! Shared types used across the codebase

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Highest page number whose offset still fits in an `i64`
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// `?page=&limit=` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated page request: page in 1..=MAX_PAGE, limit in 1..=MAX_PAGE_SIZE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Self {
            page: query.page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Page {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Pagination block for a listing, naming the total with `total_key`
    /// (e.g. `totalProducts`, `totalOrders`)
    pub fn summary(&self, total: i64, total_key: &str) -> Value {
        let total_pages = (total + self.limit - 1) / self.limit;
        let mut summary = json!({
            "currentPage": self.page,
            "totalPages": total_pages,
            "hasNext": self.page.saturating_mul(self.limit) < total,
            "hasPrev": self.page > 1,
        });
        summary[total_key] = json!(total);
        summary
    }
}

/// Order lifecycle states accepted by the admin status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Invalid order status '{}'", other)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(Page::from(PageQuery::default()), Page { page: 1, limit: 10 });
        let page = Page::from(PageQuery { page: Some(0), limit: Some(10_000) });
        assert_eq!(page, Page { page: 1, limit: MAX_PAGE_SIZE });
        let page = Page::from(PageQuery { page: Some(-4), limit: Some(0) });
        assert_eq!(page, Page { page: 1, limit: 1 });
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = Page::from(PageQuery { page: Some(i64::MAX), limit: Some(100) });
        assert_eq!(page.page, MAX_PAGE);
        assert!(page.offset() > 0);

        let summary = Page { page: i64::MAX / 2, limit: 10 }.summary(5, "totalProducts");
        assert_eq!(summary["hasNext"], false);
        assert_eq!(summary["hasPrev"], true);
        assert_eq!(summary["totalPages"], 1);
    }

    #[test]
    fn offset_is_zero_based() {
        let page = Page { page: 3, limit: 10 };
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn summary_reports_neighbours() {
        let page = Page { page: 2, limit: 10 };
        let summary = page.summary(25, "totalProducts");
        assert_eq!(summary["currentPage"], 2);
        assert_eq!(summary["totalPages"], 3);
        assert_eq!(summary["totalProducts"], 25);
        assert_eq!(summary["hasNext"], true);
        assert_eq!(summary["hasPrev"], true);

        let last = Page { page: 3, limit: 10 }.summary(25, "totalOrders");
        assert_eq!(last["hasNext"], false);
        assert_eq!(last["totalOrders"], 25);
    }

    #[test]
    fn empty_listing_has_zero_pages() {
        let summary = Page { page: 1, limit: 10 }.summary(0, "totalProducts");
        assert_eq!(summary["totalPages"], 0);
        assert_eq!(summary["hasNext"], false);
        assert_eq!(summary["hasPrev"], false);
    }

    #[test]
    fn order_status_parses_known_values_only() {
        assert_eq!("Shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}

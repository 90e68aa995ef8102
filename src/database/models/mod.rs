pub mod account;
pub mod admin;
pub mod cart;
pub mod dashboard;
pub mod order;
pub mod product;

pub use account::{Account, AccountProfile, NewAccount};
pub use admin::{AdminAccount, AdminProfile};
pub use cart::{CartItemView, CartLineUpsert, CartVariant, StockHeadroom};
pub use dashboard::{DashboardStats, OrderStatusCount};
pub use order::{Order, OrderWithCustomer};
pub use product::{Product, ProductFilter, ProductInput};

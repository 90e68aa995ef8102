pub mod accounts;
pub mod admins;
pub mod cart;
pub mod dashboard;
pub mod manager;
pub mod models;
pub mod orders;
pub mod products;

pub use accounts::AccountRepository;
pub use admins::AdminRepository;
pub use cart::CartRepository;
pub use dashboard::{Dashboard, DashboardRepository};
pub use manager::{DatabaseError, DatabaseManager};
pub use orders::OrderRepository;
pub use products::ProductRepository;

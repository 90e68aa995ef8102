// handlers/public/mod.rs - Public handlers (no token required)

pub mod auth;
pub mod products;
pub mod system;

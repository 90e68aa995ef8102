// handlers/elevated/mod.rs - Admin handlers
//
// Routed behind the admin gate; a customer token never reaches these.

pub mod dashboard;
pub mod orders;
pub mod products;
pub mod profile;

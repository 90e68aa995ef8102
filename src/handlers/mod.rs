// handlers/mod.rs - Handler tiers
//
// Public (no token) → Protected (customer token) → Elevated (admin token).
// Which gate runs in front of each tier is decided in routes.rs.

pub mod extract;
pub mod public;
pub mod protected;
pub mod elevated;

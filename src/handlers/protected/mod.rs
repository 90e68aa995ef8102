// handlers/protected/mod.rs - Customer handlers
//
// Every route here sits behind the customer gate, which attaches the
// caller's `AccountProfile` to the request before the handler runs.

pub mod cart;
pub mod profile;

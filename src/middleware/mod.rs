pub mod auth;
pub mod response;

pub use auth::{require_identity, AdminNamespace, CustomerNamespace, IdentityNamespace};
pub use response::{ApiResponse, ApiResult};

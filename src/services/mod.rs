pub mod account_service;
pub mod cart_service;

pub use account_service::{AccountError, AccountService, LoginRequest, RegisterRequest, Session};
pub use cart_service::{AddToCartRequest, CartError, CartService, CartSummary, UpdateCartRequest};

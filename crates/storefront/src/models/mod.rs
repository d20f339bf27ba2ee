//! Storefront models that are not shared catalog records.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartItem, CartView};
pub use session as session_keys;

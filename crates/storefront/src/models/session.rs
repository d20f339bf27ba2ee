//! Session keys used by the storefront.

/// Key for the visitor's [`Cart`](super::Cart).
pub const CART: &str = "cart";

//! Core types for Larder.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! catalog records shared by the storefront and admin binaries.

pub mod catalog;
pub mod contact;
pub mod email;
pub mod filter;
pub mod id;
pub mod price;
pub mod shop;
pub mod status;

pub use catalog::{
    Category, CategoryRef, NewProduct, Product, ProductInput, ProductInputError, non_blank,
};
pub use contact::{ContactMessage, NewContactMessage};
pub use email::{Email, EmailError};
pub use filter::ProductFilter;
pub use id::*;
pub use price::{
    MAX_BASE_PRICE, MAX_GST_PERCENTAGE, PRICE_SCALE, Price, PriceError, checked_final_price,
    final_price, normalize_prices,
};
pub use shop::{ShopInfo, ShopInfoInput};
pub use status::*;

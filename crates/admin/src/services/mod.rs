//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Username and password login for back-office accounts

pub mod auth;

pub use auth::{AdminAuthService, AuthError};

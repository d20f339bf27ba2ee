//! Larder Core - Shared catalog types.
//!
//! This crate provides the types used across all Larder components:
//! - `storefront` - Public catalog, cart and contact API
//! - `admin` - Back-office API including bulk spreadsheet import
//! - `cli` - Command-line tools for migrations, admin users and imports
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. The `postgres` feature adds `sqlx` encode/decode support.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, stock status, emails and catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

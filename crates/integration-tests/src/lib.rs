//! Integration tests for Larder.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p larder-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `import_pipeline` - Upload bytes through decoding, mapping, category
//!   resolution and persistence against the in-memory catalog store
//! - `catalog_pricing` - Final price derivation across admin input, import
//!   rows and the storefront cart
//!
//! These tests need no database: the import pipeline is exercised through
//! [`larder_admin::import::MemoryCatalogStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;

/// Parse a decimal literal in test fixtures.
///
/// # Panics
///
/// Panics if `s` is not a valid decimal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

//! Larder Storefront library.
//!
//! Public JSON API for the catalog, shop metadata, contact intake and the
//! session cart. Exposed as a library so it can be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

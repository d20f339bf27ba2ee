//! Larder admin library.
//!
//! Back-office API for the catalog: categories, products, shop metadata,
//! the contact inbox and bulk product import. Built as a library so the CLI
//! and integration tests can reuse the repositories and the import pipeline.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

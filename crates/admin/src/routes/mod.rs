//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /api/auth/login          - Username/password login
//! POST   /api/auth/logout         - End session
//! GET    /api/auth/me             - Current admin
//!
//! # Dashboard
//! GET    /api/dashboard           - Totals and recent products
//!
//! # Catalog
//! GET    /api/categories          - List categories
//! POST   /api/categories          - Create category
//! PUT    /api/categories/{id}     - Update category
//! DELETE /api/categories/{id}     - Delete unused category
//! GET    /api/products            - Filtered product listing
//! POST   /api/products            - Create product
//! GET    /api/products/{id}       - Product detail
//! PUT    /api/products/{id}       - Update product
//! DELETE /api/products/{id}       - Delete product
//! POST   /api/products/import     - Bulk import (multipart `file`)
//!
//! # Shop
//! GET    /api/shop-info           - Shop metadata
//! PUT    /api/shop-info           - Replace shop metadata
//!
//! # Inbox
//! GET    /api/contacts            - Contact messages
//! PUT    /api/contacts/{id}       - Mark read
//! DELETE /api/contacts/{id}       - Delete message
//! ```
//!
//! Health routes are mounted by the binary.

pub mod auth;
pub mod categories;
pub mod contacts;
pub mod dashboard;
pub mod import;
pub mod products;
pub mod shop_info;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(import::router(max_upload_bytes))
        .merge(shop_info::router())
        .merge(contacts::router())
}

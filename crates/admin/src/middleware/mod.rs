//! HTTP middleware for admin.
//!
//! - [`session`] - `PostgreSQL`-backed sessions (SameSite=Strict)
//! - [`auth`] - Extractors requiring a logged-in admin

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, RequireEditor, clear_current_admin, set_current_admin};
pub use session::create_session_layer;

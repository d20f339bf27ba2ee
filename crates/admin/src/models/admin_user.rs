//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use larder_core::{AdminRole, AdminUserId, Email};

/// A back-office account. The password hash never leaves the repository
/// except through [`crate::db::AdminUserRepository::get_with_password_hash`].
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: String,
    pub email: Option<Email>,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

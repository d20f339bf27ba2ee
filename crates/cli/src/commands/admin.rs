//! Admin user management commands.
//!
//! ```bash
//! LARDER_ADMIN_PASSWORD='...' larder admin create -u priya -e priya@larder.example -r admin
//! ```
//!
//! The password comes from `LARDER_ADMIN_PASSWORD` so it never shows up in
//! shell history or the process list.

use larder_admin::services::AdminAuthService;
use larder_core::AdminRole;

use super::{CliError, connect};

/// Environment variable holding the new account's password.
pub const PASSWORD_ENV: &str = "LARDER_ADMIN_PASSWORD";

/// Create a back-office account.
///
/// # Errors
///
/// Returns `CliError` if the role is unknown, the password is missing or
/// weak, or the username is taken.
pub async fn create_user(
    username: &str,
    email: Option<&str>,
    role: &str,
) -> Result<(), CliError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| CliError::InvalidRole(role.to_owned()))?;

    let pool = connect().await?;
    let password = std::env::var(PASSWORD_ENV).map_err(|_| CliError::MissingEnvVar(PASSWORD_ENV))?;

    tracing::info!("Creating admin user: {} ({})", username, role);
    let user = AdminAuthService::new(&pool)
        .create_admin(username, email, &password, role)
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Username: {}, Role: {}",
        user.id,
        user.username,
        user.role
    );
    Ok(())
}

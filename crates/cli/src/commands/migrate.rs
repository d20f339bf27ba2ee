//! Database migration command.
//!
//! ```bash
//! larder migrate
//! ```
//!
//! Applies every file in the workspace `migrations/` directory that has not
//! run yet, including the session table used by both binaries.

use super::{CliError, connect};

/// Run pending migrations.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    larder_admin::db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

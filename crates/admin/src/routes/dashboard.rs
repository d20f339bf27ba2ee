//! Dashboard summary endpoint.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::db::{DashboardRepository, DashboardStats};
use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(stats))
}

/// Catalog totals, the five newest products and the unread message count.
///
/// # Errors
///
/// Returns 500 if the database query fails.
#[instrument(skip(_admin, state))]
pub async fn stats(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = DashboardRepository::new(state.pool()).stats().await?;
    Ok(Json(stats))
}

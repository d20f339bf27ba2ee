//! Admin login, logout and session inspection.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::{AdminUser, CurrentAdmin};
use crate::services::AdminAuthService;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: AdminUser,
}

/// Check a username and password and start an admin session.
///
/// # Errors
///
/// Returns 400 if either field is empty and 401 if the credentials are wrong.
#[instrument(skip(state, session, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_owned(),
        ));
    }

    let user = AdminAuthService::new(state.pool())
        .login(&body.username, &body.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Admin login failed"))?;

    set_current_admin(&session, &CurrentAdmin::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    set_sentry_user(user.id.as_i32(), &user.username);
    tracing::info!(admin_id = %user.id, "Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        user,
    }))
}

/// End the admin session.
///
/// # Errors
///
/// Returns 500 if the session store fails.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;
    clear_sentry_user();
    Ok(Json(serde_json::json!({ "success": true })))
}

/// The admin attached to the current session.
///
/// # Errors
///
/// Returns 401 if the account no longer exists.
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn me(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<AdminUser>, AppError> {
    crate::db::AdminUserRepository::new(state.pool())
        .get_by_id(admin.id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_owned()))
}

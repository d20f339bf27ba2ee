//! Contact message inbox endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use tracing::instrument;

use larder_core::{ContactMessage, ContactMessageId};

use crate::db::ContactRepository;
use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Build the contacts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contacts", get(list))
        .route("/api/contacts/{id}", put(mark_read).delete(delete))
}

/// All messages, newest first.
///
/// # Errors
///
/// Returns 500 if the database query fails.
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    let messages = ContactRepository::new(state.pool()).list_all().await?;
    Ok(Json(messages))
}

/// Mark a message as read.
///
/// # Errors
///
/// Returns 404 if the message does not exist.
#[instrument(skip(_admin, state))]
pub async fn mark_read(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ContactMessageId>,
) -> Result<Json<ContactMessage>, AppError> {
    let message = ContactRepository::new(state.pool()).mark_read(id).await?;
    Ok(Json(message))
}

/// Delete a message.
///
/// # Errors
///
/// Returns 404 if the message does not exist.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn delete(
    RequireEditor(admin): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<ContactMessageId>,
) -> Result<StatusCode, AppError> {
    ContactRepository::new(state.pool()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

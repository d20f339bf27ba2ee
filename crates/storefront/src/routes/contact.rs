//! Contact form intake.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use larder_core::{ContactMessage, NewContactMessage};

use crate::db::ContactRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Contact form body. Missing fields are treated as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Store a contact message for the back-office inbox.
///
/// POST /api/contact
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactMessage>)> {
    let message = NewContactMessage::parse(&form.name, &form.email, &form.message)
        .map_err(AppError::BadRequest)?;

    let stored = ContactRepository::new(state.pool()).create(&message).await?;
    tracing::info!(message_id = %stored.id, "Contact message received");

    Ok((StatusCode::CREATED, Json(stored)))
}

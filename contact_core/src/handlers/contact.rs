//! Contact message handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    error::Result,
    extractors::{ContactMessageId, ContactPayload},
    models::ContactMessageCreated,
    AppState,
};

pub async fn create_contact_message(
    State(state): State<AppState>,
    ContactPayload(body): ContactPayload,
) -> Result<impl IntoResponse> {
    info!("POST /api/contact-messages/");

    let record = state.contact_service.create(&body).await?;

    Ok((StatusCode::CREATED, Json(ContactMessageCreated::new(record))))
}

/// Serves both the collection route and `all_messages`.
pub async fn list_contact_messages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let messages = state.contact_service.list().await?;
    info!("Listing {} contact messages", messages.len());

    Ok(Json(messages))
}

pub async fn get_contact_message(
    State(state): State<AppState>,
    ContactMessageId(id): ContactMessageId,
) -> Result<impl IntoResponse> {
    info!("GET /api/contact-messages/{}/", id);

    let record = state.contact_service.get(id).await?;
    Ok(Json(record))
}

//! Route table

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

use crate::{
    handlers::{
        contact::{create_contact_message, get_contact_message, list_contact_messages},
        health::handle_health,
    },
    models::ApiResponse,
    AppState,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route(
            "/api/contact-messages",
            get(list_contact_messages).post(create_contact_message),
        )
        .route(
            "/api/contact-messages/",
            get(list_contact_messages).post(create_contact_message),
        )
        .route("/api/contact-messages/all_messages", get(list_contact_messages))
        .route("/api/contact-messages/all_messages/", get(list_contact_messages))
        .route("/api/contact-messages/:id", get(get_contact_message))
        .route("/api/contact-messages/:id/", get(get_contact_message))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "contact_messages": "/api/contact-messages/",
            "all_messages": "/api/contact-messages/all_messages/",
            "contact_message": "/api/contact-messages/{id}/"
        }
    })))
}

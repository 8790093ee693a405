//! Health check handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

use crate::{models::ApiResponse, AppState};

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let mut healthy = true;

    let mut health_info = serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "storage": state.contact_service.storage_kind().to_string(),
        "version": state.version,
    });

    match state.contact_service.count().await {
        Ok(count) => health_info["contact_messages"] = count.into(),
        Err(e) => {
            warn!("Health check could not count contact messages: {}", e);
            healthy = false;
        }
    }

    if let Some(db_manager) = &state.db_manager {
        match db_manager.health_check().await {
            Ok(_) => {
                health_info["database_status"] = "healthy".into();
            }
            Err(e) => {
                healthy = false;
                health_info["database_status"] = "unhealthy".into();
                health_info["database_error"] = e.to_string().into();
            }
        }
    }

    if healthy {
        (StatusCode::OK, Json(ApiResponse::success(health_info)))
    } else {
        health_info["status"] = "unhealthy".into();
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure(health_info, "Service unhealthy")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        connection::test_support::temp_pool, run_migrations, DatabaseManager,
        SqliteContactMessageRepository,
    };
    use axum::{body::to_bytes, response::Response};
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_memory_store_is_healthy() {
        let response = handle_health(State(AppState::default())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["storage"], "memory");
        assert_eq!(body["data"]["contact_messages"], 0);
    }

    #[tokio::test]
    async fn test_closed_pool_reports_failure() {
        let (pool, _file) = temp_pool().await;
        run_migrations(pool.clone()).await.unwrap();
        let state = AppState::with_database(
            DatabaseManager::new(pool.clone()),
            SqliteContactMessageRepository::new(pool.clone()),
        );
        pool.close().await;

        let response = handle_health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Service unhealthy");
        assert_eq!(body["data"]["status"], "unhealthy");
        assert_eq!(body["data"]["database_status"], "unhealthy");
    }
}

//! Contact message service: validation, storage and HTTP routes for contact
//! form submissions.

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;

pub use crate::config::AppConfig;
pub use database::{
    get_database_pool, run_migrations, ContactMessageRepository, DatabaseManager,
    SqliteContactMessageRepository,
};
pub use error::{AppError, Result};
pub use handlers::create_routes;
pub use models::{ContactMessage, ContactMessageCreated, ContactMessageSchema, NewContactMessage};
pub use services::{ContactMessageService, StorageKind};
pub use store::MemoryStore;
pub use validation::ValidationErrors;

use axum::{middleware as axum_middleware, Router};
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact_service: ContactMessageService,
    pub db_manager: Option<DatabaseManager>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_memory_store(MemoryStore::new())
    }
}

impl AppState {
    pub fn with_memory_store(store: MemoryStore) -> Self {
        Self {
            app_name: "Contact Message Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_service: ContactMessageService::with_memory_store(store),
            db_manager: None,
        }
    }

    pub fn with_database(
        db_manager: DatabaseManager,
        repository: SqliteContactMessageRepository,
    ) -> Self {
        Self {
            app_name: "Contact Message Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_service: ContactMessageService::with_database(repository),
            db_manager: Some(db_manager),
        }
    }

    /// Opens the configured store: the in-memory store for `sqlite::memory:`,
    /// otherwise a SQLite pool (migrated when `migrate_on_start` is set).
    pub async fn from_config(config: &crate::config::DatabaseConfig) -> Result<Self> {
        if config.is_memory() {
            info!("Using in-memory contact message store");
            return Ok(Self::default());
        }

        let pool = get_database_pool(config).await?;

        if config.migrate_on_start {
            run_migrations(pool.clone()).await?;
        }

        let db_manager = DatabaseManager::new(pool.clone());
        let repository = SqliteContactMessageRepository::new(pool);

        Ok(Self::with_database(db_manager, repository))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(middleware::trace_layer())
                .layer(axum_middleware::from_fn(middleware::log_requests))
                .layer(middleware::cors_layer_from_config(&config.cors)),
        )
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

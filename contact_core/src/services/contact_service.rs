use serde_json::Value;
use std::{fmt, sync::Arc};
use tracing::{info, warn};

use crate::{
    database::{ContactMessageRepository, SqliteContactMessageRepository},
    error::{AppError, Result},
    models::{ContactMessage, ContactMessageSchema},
    store::MemoryStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Database,
    Memory,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Database => write!(f, "database"),
            StorageKind::Memory => write!(f, "memory"),
        }
    }
}

/// Create, list and retrieve contact messages. Holds no state of its own;
/// every call goes straight to the repository.
#[derive(Clone)]
pub struct ContactMessageService {
    repository: Arc<dyn ContactMessageRepository>,
    storage: StorageKind,
}

impl ContactMessageService {
    pub fn new(repository: Arc<dyn ContactMessageRepository>, storage: StorageKind) -> Self {
        Self {
            repository,
            storage,
        }
    }

    pub fn with_database(repository: SqliteContactMessageRepository) -> Self {
        Self::new(Arc::new(repository), StorageKind::Database)
    }

    pub fn with_memory_store(store: MemoryStore) -> Self {
        Self::new(Arc::new(store), StorageKind::Memory)
    }

    /// Validates `body` and stores it. Nothing is written when validation fails.
    pub async fn create(&self, body: &Value) -> Result<ContactMessage> {
        let new_message = ContactMessageSchema::validate_value(body).map_err(|errors| {
            warn!("Rejected contact message: {}", errors);
            AppError::Validation(errors)
        })?;

        let record = self.repository.insert(new_message).await?;
        info!(id = record.id, "Contact message stored");

        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>> {
        self.repository.list_all().await
    }

    pub async fn get(&self, id: i64) -> Result<ContactMessage> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact message with id {} not found", id)))
    }

    pub async fn count(&self) -> Result<i64> {
        self.repository.count().await
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.storage
    }

    pub fn is_using_database(&self) -> bool {
        self.storage == StorageKind::Database
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{connection::test_support::temp_pool, run_migrations};
    use serde_json::json;

    fn memory_service() -> ContactMessageService {
        ContactMessageService::with_memory_store(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let service = memory_service();

        let record = service
            .create(&json!({"name": "Alice", "email": "a@example.com", "message": "Hello"}))
            .await
            .unwrap();

        assert_eq!(record.name, "Alice");
        assert_eq!(service.list().await.unwrap(), vec![record.clone()]);
        assert_eq!(service.get(record.id).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_invalid_create_writes_nothing() {
        let service = memory_service();

        let err = service
            .create(&json!({"name": "Alice", "message": "Hello"}))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(errors) => assert!(errors.has_field("email")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let service = memory_service();
        assert!(matches!(service.get(7).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_database_backed_service() {
        let (pool, _file) = temp_pool().await;
        run_migrations(pool.clone()).await.unwrap();
        let service = ContactMessageService::with_database(SqliteContactMessageRepository::new(pool));

        assert!(service.is_using_database());
        assert_eq!(service.storage_kind().to_string(), "database");

        let first = service
            .create(&json!({"name": "A", "email": "a@example.com", "message": "one"}))
            .await
            .unwrap();
        let second = service
            .create(&json!({"name": "B", "email": "b@example.com", "message": "two"}))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.list().await.unwrap(), vec![first, second]);
    }
}

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{error, info};

use crate::error::{AppError, Result};

pub struct MigrationManager {
    pool: SqlitePool,
}

impl MigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Applies every migration newer than the recorded version. Returns how
    /// many were applied.
    pub async fn run_migrations(&self) -> Result<usize> {
        info!("Starting database migrations");

        self.create_migrations_table().await?;

        let current_version = self.get_current_version().await?;
        info!("Current migration version: {}", current_version);

        let mut applied_count = 0;

        for migration in migrations() {
            if migration.version > current_version {
                info!("Applying migration {}: {}", migration.version, migration.name);
                self.apply_migration(&migration).await?;
                applied_count += 1;
            }
        }

        if applied_count > 0 {
            info!("Applied {} migrations successfully", applied_count);
        } else {
            info!("No new migrations to apply");
        }

        Ok(applied_count)
    }

    async fn create_migrations_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                checksum TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }

    async fn get_current_version(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COALESCE(MAX(version), 0) as version FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        row.try_get("version").map_err(AppError::from)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        for statement in migration.sql_statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("Failed to execute migration statement: {}", e);
                    AppError::from(e)
                })?;
        }

        sqlx::query(
            r#"
            INSERT INTO _migrations (version, name, checksum)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(migration.version)
        .bind(migration.name)
        .bind(migration.checksum)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;
        Ok(())
    }

    pub async fn get_migration_history(&self) -> Result<Vec<MigrationRecord>> {
        let records = sqlx::query_as::<_, MigrationRecord>(
            r#"
            SELECT version, name, applied_at, checksum
            FROM _migrations
            ORDER BY version
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(records)
    }
}

#[derive(Debug, Clone)]
struct Migration {
    version: i64,
    name: &'static str,
    checksum: &'static str,
    sql_statements: &'static [&'static str],
}

fn migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        name: "create_contact_messages_table",
        checksum: "contact_messages_v1",
        sql_statements: &[
            r#"
            CREATE TABLE contact_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at DATETIME NOT NULL
            )
            "#,
            r#"
            CREATE INDEX idx_contact_messages_created_at ON contact_messages(created_at)
            "#,
        ],
    }]
}

#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: DateTime<Utc>,
    pub checksum: String,
}

pub async fn run_migrations(pool: SqlitePool) -> Result<usize> {
    let migration_manager = MigrationManager::new(pool);
    migration_manager.run_migrations().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_support::temp_pool;

    #[tokio::test]
    async fn test_migrations() {
        let (pool, _file) = temp_pool().await;
        let migration_manager = MigrationManager::new(pool.clone());

        let applied = migration_manager.run_migrations().await.unwrap();
        assert_eq!(applied, migrations().len());

        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM sqlite_master WHERE type='table' AND name = 'contact_messages'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        let table_count: i64 = row.try_get("count").unwrap();
        assert_eq!(table_count, 1);

        let history = migration_manager.get_migration_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].name, "create_contact_messages_table");
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let (pool, _file) = temp_pool().await;

        run_migrations(pool.clone()).await.unwrap();
        let second_run = run_migrations(pool.clone()).await.unwrap();
        assert_eq!(second_run, 0);

        let history = MigrationManager::new(pool).get_migration_history().await.unwrap();
        assert_eq!(history.len(), migrations().len());
    }
}

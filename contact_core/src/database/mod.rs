pub mod connection;
pub mod migrations;
pub mod repository;

pub use connection::{get_database_pool, DatabaseManager};
pub use migrations::{run_migrations, MigrationManager, MigrationRecord};
pub use repository::{ContactMessageRepository, SqliteContactMessageRepository};

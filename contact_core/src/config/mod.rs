pub mod settings;

pub use settings::{AppConfig, CorsConfig, DatabaseConfig, LoggingConfig, ServerConfig};

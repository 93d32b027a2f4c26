//! Configuration management for the rigbase catalog

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    /// Pre-warmed floor of the connection pool
    pub min_connections: u32,
    /// Hard ceiling of the connection pool
    pub max_connections: u32,
    /// Maximum wait for an `acquire`, in seconds
    pub connection_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Connection options for the configured backend
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// The `DB_*` variables are the recognized external surface; they override
    /// whatever the files and the `RIGBASE_` environment provide. The result
    /// is consumed once at pool construction and never re-read.
    pub fn load() -> Result<Self, ConfigError> {
        // Load environment variables from a .env file when present
        dotenvy::dotenv().ok();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix RIGBASE_)
            .add_source(
                Environment::with_prefix("RIGBASE")
                    .separator("_")
                    .try_parsing(true),
            )
            // Explicit DB_* overrides
            .set_override_option("database.host", env::var("DB_HOST").ok())?
            .set_override_option("database.port", env::var("DB_PORT").ok())?
            .set_override_option("database.name", env::var("DB_NAME").ok())?
            .set_override_option("database.user", env::var("DB_USER").ok())?
            .set_override_option("database.password", env::var("DB_PASSWORD").ok())?
            .set_override_option(
                "database.min_connections",
                env::var("DB_MIN_CONNECTIONS").ok(),
            )?
            .set_override_option(
                "database.max_connections",
                env::var("DB_MAX_CONNECTIONS").ok(),
            )?
            .set_override_option(
                "database.connection_timeout_secs",
                env::var("DB_CONNECTION_TIMEOUT").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: "rigbase".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            min_connections: 1,
            max_connections: 10,
            connection_timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

//! Configuration for the catalog API

use core_config::{AppInfo, FromEnv, app_info, env_parse_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Create the products table at startup when missing (`DB_ENSURE_SCHEMA`)
    pub ensure_schema: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let ensure_schema = env_parse_or_default("DB_ENSURE_SCHEMA", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            ensure_schema,
        })
    }
}

use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Suppresses the local URL hint at startup.
    pub production: bool,
    pub shutdown_grace_seconds: u64,
    pub query_timeout_seconds: u64,
}

impl ServerConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// Same as [`Config::load`], reading process variables through `var`.
    /// Empty legacy variables count as unset.
    pub fn load_with<F>(var: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let legacy = |key: &str| var(key).filter(|v| !v.is_empty());
        let run_mode = var("RUN_MODE").unwrap_or_else(|| "development".into());

        let builder = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // FLIGHTS__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("FLIGHTS").separator("__"))
            .set_override_option("database.url", legacy("DATABASE_STRING"))?
            .set_override_option("server.port", legacy("PORT"))?
            .set_override_option("server.production", legacy("PRODUCTION").map(|_| true))?;

        builder.build()?.try_deserialize()
    }

    /// Everything except `database.url`, which has no sensible default.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.port", 8080)?
            .set_default("server.production", false)?
            .set_default("server.shutdown_grace_seconds", 10)?
            .set_default("server.query_timeout_seconds", 5)?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_seconds", 3)
    }
}

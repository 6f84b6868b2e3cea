// Runtime configuration.
//
// Every key has a default so a bare checkout runs against a local SQLite file. A `.env` file in
// the working directory is loaded first when present.

use anyhow::Context;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://time_approvals.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_NOTIFICATION_TOPIC: &str = "time-approvals";
pub const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub notification_topic: String,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(error) = dotenvy::dotenv() {
            if !error.not_found() {
                return Err(error).context("reading .env");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if database_max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            database_max_connections,
            notification_topic: lookup("NOTIFICATION_TOPIC")
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_TOPIC.into()),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        })
    }
}

use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLx connection URL (default: "sqlite://pointbook.db?mode=rwc")
    pub database_url: String,
    /// Maximum pooled store connections (default: 5)
    pub database_max_connections: u32,
    /// Application name used in `X-<app>-*` alert headers (default: "pointbookApp")
    pub app_name: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - store connection URL (default: "sqlite://pointbook.db?mode=rwc")
    /// - `DATABASE_MAX_CONNECTIONS` - pool size (default: 5)
    /// - `APP_NAME` - alert header prefix (default: "pointbookApp")
    /// - `REQUEST_TIMEOUT_SECONDS` - request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://pointbook.db?mode=rwc".to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "pointbookApp".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

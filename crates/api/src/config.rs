use std::time::Duration;

use lucrum_core::training::{TrainingSettings, DEFAULT_STORE_TIMEOUT_SECS};
use lucrum_core::video_sources::DEFAULT_UPLOAD_PREFIX;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound for draining in-flight requests on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Upper bound for a single progress store call (default: `20`).
    pub store_timeout_secs: u64,
    /// Directory uploaded training videos must live under.
    pub video_upload_prefix: String,
    /// JWT validation configuration.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `STORE_TIMEOUT_SECS`   | `20`                       |
    /// | `VIDEO_UPLOAD_PREFIX`  | `public/uploads/videos`    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let store_timeout_secs: u64 = std::env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_STORE_TIMEOUT_SECS.to_string())
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");

        let video_upload_prefix = std::env::var("VIDEO_UPLOAD_PREFIX")
            .unwrap_or_else(|_| DEFAULT_UPLOAD_PREFIX.into());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            store_timeout_secs,
            video_upload_prefix,
            jwt,
        }
    }

    /// Settings handed to the training operations.
    pub fn training_settings(&self) -> TrainingSettings {
        TrainingSettings {
            store_timeout: Duration::from_secs(self.store_timeout_secs),
        }
    }
}

use anyhow::{bail, Context, Result};

/// Credentials for the hosted backend's auth endpoint.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

/// Application configuration loaded from environment variables.
/// Storage URLs are optional; without them the in-memory stores are used.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub backend: Option<BackendConfig>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend = match (optional_env("BACKEND_URL"), optional_env("BACKEND_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(BackendConfig { url, anon_key }),
            (None, None) => None,
            _ => bail!("BACKEND_URL and BACKEND_ANON_KEY must be set together"),
        };

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            redis_url: optional_env("REDIS_URL"),
            backend,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Set and non-blank, or `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

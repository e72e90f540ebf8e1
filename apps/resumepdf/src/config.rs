use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// When set, session data lives in redis; otherwise in process memory.
    pub redis_url: Option<String>,
    /// Idle lifetime of a session's stored form data.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            redis_url: optional_env("REDIS_URL"),
            session_ttl: match optional_env("SESSION_TTL_SECS") {
                Some(raw) => Duration::from_secs(
                    raw.parse::<u64>()
                        .context("SESSION_TTL_SECS must be a whole number of seconds")?,
                ),
                None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            },
        })
    }
}

/// Treats unset and blank variables alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

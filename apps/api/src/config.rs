use anyhow::{Context, Result};

use crate::document::chunker::DEFAULT_CHUNK_SIZE;
use crate::document::similarity::DEFAULT_TOP_K;

/// Service configuration loaded from environment variables.
/// Every variable is optional; malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ping_message: String,
    pub max_upload_bytes: usize,
    /// Upper bound (in characters) for a resume chunk.
    pub chunk_size: usize,
    /// Number of resume chunks retrieved per question.
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            ping_message: "ping".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            chunk_size: DEFAULT_CHUNK_SIZE,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            ping_message: std::env::var("PING_MESSAGE").unwrap_or(defaults.ping_message),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            chunk_size: parse_env("CHUNK_SIZE", defaults.chunk_size)?,
            top_k: parse_env("TOP_K", defaults.top_k)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.ping_message, "ping");
    }

    #[test]
    fn test_parse_env_falls_back_when_unset() {
        let value: usize = parse_env("SCREENER_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SCREENER_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_env("SCREENER_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("SCREENER_TEST_BAD_PORT");
    }
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Where the plan entry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// One JSON file under `data_dir`.
    File,
    /// In-process only; nothing survives a restart.
    Memory,
}

impl StorageKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => bail!("PLAN_STORAGE must be \"file\" or \"memory\", got {other:?}"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageKind,
    /// Directory holding the durable plan entry.
    pub data_dir: PathBuf,
    /// Delay between a save and the visible "saved" status.
    pub save_settle: Duration,
    /// Enables suggestion generation when set.
    pub anthropic_api_key: Option<String>,
    /// Overrides the Messages API endpoint (proxies, local mocks).
    pub anthropic_api_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            storage: match optional_env("PLAN_STORAGE") {
                Some(value) => StorageKind::parse(&value)?,
                None => StorageKind::File,
            },
            data_dir: std::env::var("PLAN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            save_settle: Duration::from_millis(
                std::env::var("SAVE_SETTLE_MS")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse::<u64>()
                    .context("SAVE_SETTLE_MS must be a number of milliseconds")?,
            ),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_api_url: optional_env("ANTHROPIC_API_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and empty both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kind_parses_known_values() {
        assert_eq!(StorageKind::parse("file").unwrap(), StorageKind::File);
        assert_eq!(StorageKind::parse(" Memory ").unwrap(), StorageKind::Memory);
        assert!(StorageKind::parse("redis").is_err());
    }
}

use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub max_workers: usize,
    pub db_path: String,
    pub schema_path: String,
    /// When set, the report view fetches the listing over HTTP instead of
    /// reading the store in-process.
    pub source_url: Option<String>,
    pub fetch_timeout: Duration,
    /// Offset used when formatting `createdAt` for display and export.
    pub display_offset: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            db_path: "report.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            source_url: None,
            fetch_timeout: Duration::from_secs(10),
            display_offset: Utc.fix(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            addr: try_load("REPORT_ADDR", defaults.addr)?,
            max_workers: try_load("REPORT_MAX_WORKERS", defaults.max_workers)?,
            db_path: try_load("REPORT_DB_PATH", defaults.db_path)?,
            schema_path: try_load("REPORT_SCHEMA_PATH", defaults.schema_path)?,
            source_url: var("REPORT_SOURCE_URL").filter(|url| !url.trim().is_empty()),
            fetch_timeout: Duration::from_secs(try_load(
                "REPORT_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            display_offset: try_load("REPORT_DISPLAY_OFFSET", defaults.display_offset)?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                value: raw,
                reason: e.to_string(),
            }
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

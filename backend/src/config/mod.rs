//! Central module for application-wide configuration settings.
//!
//! Settings come from `BOARD_*` environment variables. A missing variable
//! falls back to its default; a present but unparsable one fails startup.

use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite file path, or `:memory:`.
    pub database: String,
    pub page_size: usize,
    pub session_ttl: Duration,
    /// Create a demo account and article when the database is empty.
    pub seed: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let session_ttl = session_ttl(try_load("BOARD_SESSION_TTL_MINUTES", "120")?)?;
        Ok(Self {
            host: try_load("BOARD_HOST", "127.0.0.1")?,
            port: try_load("BOARD_PORT", "8080")?,
            database: try_load("BOARD_DATABASE", "board.db")?,
            page_size: try_load::<usize>("BOARD_PAGE_SIZE", "10")?.max(1),
            session_ttl,
            seed: try_load("BOARD_SEED", "false")?,
        })
    }

    pub fn address(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: "BOARD_HOST",
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: ":memory:".to_string(),
            page_size: 10,
            session_ttl: Duration::from_secs(120 * 60),
            seed: false,
        }
    }
}

fn session_ttl(minutes: u64) -> Result<Duration, ConfigError> {
    minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid {
            key: "BOARD_SESSION_TTL_MINUTES",
            value: minutes.to_string(),
            reason: "too large".to_string(),
        })
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PINTEREST_API_BASE: &str = "https://api.pinterest.com/v5";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Unset means the in-memory store is used.
    pub database_url: Option<String>,
    pub pinterest_access_token: Option<String>,
    pub pinterest_api_base: String,
    pub pinterest_timeout: Duration,
    pub frontend_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub is_dev: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs: u64 = parse_number(&lookup, "PINTEREST_TIMEOUT_SECS", 10)?;
        let server_port: u16 = parse_number(&lookup, "PORT", 5000)?;

        Ok(Config {
            database_url: non_empty("DATABASE_URL"),
            pinterest_access_token: non_empty("PINTEREST_ACCESS_TOKEN"),
            pinterest_api_base: non_empty("PINTEREST_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_PINTEREST_API_BASE.to_string()),
            pinterest_timeout: Duration::from_secs(timeout_secs),
            frontend_url: non_empty("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            server_host: non_empty("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            is_dev: lookup("APP_ENV").as_deref() != Some("production"),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let parsed = raw.trim().parse::<T>();
    match parsed {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

use crate::map::engine::DEFAULT_STYLE;
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub listings_url: String,
    pub fetch_timeout: Duration,
    pub max_workers: usize,
    /// Absent means the map region is left off the page.
    pub mapbox_access_token: Option<String>,
    pub map_style: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            listings_url: "http://127.0.0.1:8080/api/listings/recent".to_string(),
            fetch_timeout: Duration::from_secs(30),
            max_workers: 8,
            mapbox_access_token: None,
            map_style: DEFAULT_STYLE.to_string(),
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Config::default();

        Ok(Self {
            bind_addr: parsed("BIND_ADDR", defaults.bind_addr)?,
            listings_url: env::var("LISTINGS_URL").unwrap_or(defaults.listings_url),
            fetch_timeout: Duration::from_secs(parsed(
                "FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            max_workers: parsed("MAX_WORKERS", defaults.max_workers)?,
            mapbox_access_token: env::var("MAPBOX_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            map_style: env::var("MAP_STYLE").unwrap_or(defaults.map_style),
        })
    }
}

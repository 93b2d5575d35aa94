use crate::datasource::MockConfig;
use crate::domain::display::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_addr: IpAddr,
    pub mock: MockConfig,
    pub page_size: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let bind_addr = env_map
            .get("BIND_ADDR")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "BIND_ADDR".to_string(),
                    "must be a valid IP address".to_string(),
                )
            })?;

        let defaults = MockConfig::default();
        let total_trades = parse_count(&env_map, "MOCK_TOTAL_TRADES", defaults.total_trades)?;
        let unique_trades = parse_count(&env_map, "MOCK_UNIQUE_TRADES", defaults.unique_trades)?;
        if unique_trades == 0 {
            return Err(ConfigError::InvalidValue(
                "MOCK_UNIQUE_TRADES".to_string(),
                "must be greater than 0".to_string(),
            ));
        }
        if unique_trades > total_trades {
            return Err(ConfigError::InvalidValue(
                "MOCK_UNIQUE_TRADES".to_string(),
                format!("must not exceed MOCK_TOTAL_TRADES ({})", total_trades),
            ));
        }

        let page_size = parse_count(&env_map, "PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ConfigError::InvalidValue(
                "PAGE_SIZE".to_string(),
                format!("must be one of {:?}, got {}", PAGE_SIZE_OPTIONS, page_size),
            ));
        }

        Ok(Config {
            port,
            bind_addr,
            mock: MockConfig {
                total_trades,
                unique_trades,
            },
            page_size,
        })
    }
}

fn parse_count(
    env_map: &HashMap<String, String>,
    key: &str,
    default: usize,
) -> Result<usize, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            ConfigError::InvalidValue(key.to_string(), "must be a non-negative integer".to_string())
        }),
    }
}

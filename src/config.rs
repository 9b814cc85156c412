use std::str::FromStr;
use std::time::Duration;

use crate::nutrition::{Comparison, ThresholdTable};

pub const DEFAULT_PRODUCT_API_BASE: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_USER_AGENT: &str = concat!("nutrilight/", env!("CARGO_PKG_VERSION"));
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20MB

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ProductApiConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl Default for ProductApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PRODUCT_API_BASE.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub product_api: ProductApiConfig,
    pub thresholds: ThresholdTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            product_api: ProductApiConfig::default(),
            thresholds: ThresholdTable::standard(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source; `from_env` passes
    /// the process environment.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut thresholds = match get("TRAFFIC_LIGHT_PROFILE") {
            Some(v) => ThresholdTable::from_profile(&v).ok_or(ConfigError::Invalid {
                name: "TRAFFIC_LIGHT_PROFILE",
                value: v,
            })?,
            None => defaults.thresholds,
        };
        if let Some(v) = get("TRAFFIC_LIGHT_COMPARISON") {
            thresholds.comparison = Comparison::from_str(&v).map_err(|_| ConfigError::Invalid {
                name: "TRAFFIC_LIGHT_COMPARISON",
                value: v,
            })?;
        }

        let timeout = parse_opt::<u64, _>(&get, "PRODUCT_API_TIMEOUT_SECS")?.map(Duration::from_secs);

        Ok(Self {
            host: get("APP_HOST").unwrap_or(defaults.host),
            port: parse_opt(&get, "APP_PORT")?.unwrap_or(defaults.port),
            max_upload_bytes: parse_opt(&get, "MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            product_api: ProductApiConfig {
                base_url: get("PRODUCT_API_BASE")
                    .map(|v| v.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.product_api.base_url),
                user_agent: get("PRODUCT_API_USER_AGENT")
                    .unwrap_or(defaults.product_api.user_agent),
                timeout,
            },
            thresholds,
        })
    }
}

fn parse_opt<T, F>(get: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}

use std::{env, time::Duration};

use thiserror::Error;

use crate::services::maps_client::http_client::HttpClientConfig;

const DEFAULT_MAPS_HOST: &str = "https://maps.googleapis.com";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub maps_host: String,
    pub maps_api_key: String,
    pub bind_addr: String,
    pub http: HttpClientConfig,
    pub abort_superseded_requests: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = HttpClientConfig::default();

        Ok(Self {
            maps_host: lookup("GOOGLE_MAPS_HOST")
                .unwrap_or_else(|| DEFAULT_MAPS_HOST.to_string())
                .trim_end_matches('/')
                .to_string(),
            maps_api_key: lookup("GOOGLE_MAPS_API_KEY")
                .filter(|key| !key.is_empty())
                .ok_or(ConfigError::Missing("GOOGLE_MAPS_API_KEY"))?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            http: HttpClientConfig {
                timeout: parse(&lookup, "HTTP_TIMEOUT_MS")?
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.timeout),
                max_retries: parse(&lookup, "HTTP_MAX_RETRIES")?.unwrap_or(defaults.max_retries),
                initial_backoff: parse(&lookup, "HTTP_RETRY_BACKOFF_MS")?
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.initial_backoff),
            },
            abort_superseded_requests: parse(&lookup, "ABORT_SUPERSEDED_REQUESTS")?
                .unwrap_or(true),
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

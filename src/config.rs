/// Paging and logging configuration

use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Rows per page served by in-memory fetchers
    pub page_size: usize,

    /// Simulated latency per page fetch, in milliseconds
    pub fetch_latency_ms: u64,

    /// Start prefetching once this many buffered rows remain
    pub prefetch_threshold: usize,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            fetch_latency_ms: 0,
            prefetch_threshold: 20,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl PagingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            page_size: parse_or(&lookup, "GRAPH_PAGE_SIZE", defaults.page_size)?,
            fetch_latency_ms: parse_or(
                &lookup,
                "GRAPH_FETCH_LATENCY_MS",
                defaults.fetch_latency_ms,
            )?,
            prefetch_threshold: parse_or(
                &lookup,
                "GRAPH_PREFETCH_THRESHOLD",
                defaults.prefetch_threshold,
            )?,
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL").unwrap_or(defaults.logging.level),
                format: lookup("LOG_FORMAT").unwrap_or(defaults.logging.format),
            },
        })
    }

    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PagingConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PagingConfig::default());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = PagingConfig::from_lookup(lookup_from(&[
            ("GRAPH_PAGE_SIZE", "500"),
            ("GRAPH_FETCH_LATENCY_MS", "15"),
            ("GRAPH_PREFETCH_THRESHOLD", "50"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.page_size, 500);
        assert_eq!(config.fetch_latency(), Duration::from_millis(15));
        assert_eq!(config.prefetch_threshold, 50);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_number() {
        let err = PagingConfig::from_lookup(lookup_from(&[("GRAPH_PAGE_SIZE", "lots")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for GRAPH_PAGE_SIZE: lots");
    }

    #[test]
    fn test_partial_json() {
        let config: PagingConfig = serde_json::from_str(r#"{"page_size": 5}"#).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.prefetch_threshold, 20);
    }
}

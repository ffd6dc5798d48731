use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::{info, warn};

pub const BACKEND_URL_VAR: &str = "PREPHUB_BACKEND_URL";
pub const TIMEOUT_VAR: &str = "PREPHUB_TIMEOUT_SECS";
pub const LOG_FILTER_VAR: &str = "PREPHUB_LOG";
pub const LOG_FILE_VAR: &str = "PREPHUB_LOG_FILE";

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: &str = "30";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_LOG_FILE: &str = "prephub.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL both endpoints are formed from, without trailing slash.
    pub backend_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = try_load(&lookup, BACKEND_URL_VAR, DEFAULT_BACKEND_URL);
        let backend_url = backend_url.trim().trim_end_matches('/').to_string();
        Url::parse(&backend_url).map_err(|e| ConfigError::Invalid {
            key: BACKEND_URL_VAR,
            value: backend_url.clone(),
            reason: e.to_string(),
        })?;

        let timeout = try_load(&lookup, TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS);
        let timeout_secs: u64 = parse(TIMEOUT_VAR, &timeout)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: TIMEOUT_VAR,
                value: timeout,
                reason: "must be at least one second".to_string(),
            });
        }

        Ok(Self {
            backend_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Where and how much to log. Loaded before the subscriber exists, so it
/// does not log anything itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub file: PathBuf,
}

impl LogSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            filter: lookup(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            file: lookup(LOG_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

fn try_load<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_backend_url_trailing_slash_is_trimmed() {
        let config = Config::from_lookup(lookup(&[(BACKEND_URL_VAR, "https://api.example.com/v1/")])).unwrap();
        assert_eq!(config.backend_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_invalid_backend_url_is_rejected() {
        let err = Config::from_lookup(lookup(&[(BACKEND_URL_VAR, "not a url")])).unwrap_err();
        assert!(err.to_string().contains(BACKEND_URL_VAR));
    }

    #[test]
    fn test_timeout_is_parsed() {
        let config = Config::from_lookup(lookup(&[(TIMEOUT_VAR, " 5 ")])).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        assert!(Config::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).is_err());
    }

    #[test]
    fn test_log_settings() {
        let defaults = LogSettings::from_lookup(lookup(&[]));
        assert_eq!(defaults.filter, "info");
        assert_eq!(defaults.file, PathBuf::from("prephub.log"));

        let custom = LogSettings::from_lookup(lookup(&[
            (LOG_FILTER_VAR, "prephub=debug"),
            (LOG_FILE_VAR, "/tmp/prephub-test.log"),
        ]));
        assert_eq!(custom.filter, "prephub=debug");
        assert_eq!(custom.file, PathBuf::from("/tmp/prephub-test.log"));
    }
}

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const GATEWAY_URL_KEY: &str = "TRADE_CHAT_GATEWAY_URL";
pub const TIMEOUT_KEY: &str = "TRADE_CHAT_TIMEOUT_SECS";

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8000/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("trade_chat/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} '{value}': {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("Invalid {key} '{value}': only http and https are supported")]
    UnsupportedScheme { key: &'static str, value: String },
    #[error("Invalid {key} '{value}': expected a whole number of seconds")]
    InvalidTimeout { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl GatewayConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(GATEWAY_URL_KEY).unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = lookup(TIMEOUT_KEY) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout {
                    key: TIMEOUT_KEY,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Endpoint paths are joined relative to the base, so it always ends in `/`.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
        key: GATEWAY_URL_KEY,
        value: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme {
            key: GATEWAY_URL_KEY,
            value: raw.to_string(),
        }),
    }
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
    fn defaults_when_nothing_is_set() {
        let config = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("trade_chat/"));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = GatewayConfig::from_lookup(lookup(&[(
            GATEWAY_URL_KEY,
            "https://desk.example.com/chatbot",
        )]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://desk.example.com/chatbot/");
        assert_eq!(
            config.base_url.join("api/ask").unwrap().as_str(),
            "https://desk.example.com/chatbot/api/ask"
        );
    }

    #[test]
    fn rejects_bad_values() {
        let err = GatewayConfig::from_lookup(lookup(&[(TIMEOUT_KEY, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));

        let err = GatewayConfig::from_lookup(lookup(&[(GATEWAY_URL_KEY, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = GatewayConfig::new("ftp://files.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
    }

    #[test]
    fn timeout_override() {
        let config = GatewayConfig::from_lookup(lookup(&[(TIMEOUT_KEY, " 3 ")])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
    }
}

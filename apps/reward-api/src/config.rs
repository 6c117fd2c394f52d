//! Reward API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use serde::Serialize;

/// Deployment environment reported by the healthcheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue("APP_ENV".to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-client rate limiter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LimiterConfig {
    /// Enable per-IP rate limiting
    pub enabled: bool,

    /// Tokens refilled per second
    pub rps: f64,

    /// Bucket capacity
    pub burst: u32,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        LimiterConfig {
            enabled: true,
            rps: 2.0,
            burst: 4,
        }
    }
}

/// Reward API configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// HTTP listen address
    pub bind_addr: IpAddr,

    /// Deployment environment
    pub env: Environment,

    /// Rate limiter settings
    pub limiter: LimiterConfig,

    /// Per-request deadline in seconds
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 4000,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            env: Environment::default(),
            limiter: LimiterConfig::default(),
            request_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            bind_addr: parse_var(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            env: match lookup("APP_ENV") {
                Some(raw) => raw.trim().parse()?,
                None => defaults.env,
            },
            limiter: LimiterConfig {
                enabled: parse_var(&lookup, "LIMITER_ENABLED", defaults.limiter.enabled)?,
                rps: parse_var(&lookup, "LIMITER_RPS", defaults.limiter.rps)?,
                burst: parse_var(&lookup, "LIMITER_BURST", defaults.limiter.burst)?,
            },
            request_timeout_secs: parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
        };

        // A negative or NaN refill rate would never admit a request again
        if !(config.limiter.rps.is_finite() && config.limiter.rps >= 0.0) {
            return Err(ConfigError::InvalidValue("LIMITER_RPS".to_string()));
        }

        if config.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()));
        }

        Ok(config)
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::load_from(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:4000");
        assert!(config.limiter.enabled);
        assert_eq!(config.limiter.burst, 4);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("APP_ENV", "Production"),
            ("LIMITER_ENABLED", "false"),
            ("LIMITER_RPS", "0.5"),
            ("LIMITER_BURST", "10"),
            ("REQUEST_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.env, Environment::Production);
        assert!(!config.limiter.enabled);
        assert_eq!(config.limiter.rps, 0.5);
        assert_eq!(config.limiter.burst, 10);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("PORT", "http"),
            ("PORT", "70000"),
            ("BIND_ADDR", "localhost"),
            ("APP_ENV", "qa"),
            ("LIMITER_ENABLED", "yes"),
            ("LIMITER_RPS", "-1"),
            ("LIMITER_BURST", "-4"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ];

        for (name, value) in cases {
            assert_eq!(
                load(&[(name, value)]),
                Err(ConfigError::InvalidValue(name.to_string())),
                "{name}={value}"
            );
        }
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Staging.to_string(), "staging");
        assert_eq!(
            serde_json::to_string(&Environment::Development).unwrap(),
            "\"development\""
        );
    }
}

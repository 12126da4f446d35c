//! Process configuration, read from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "ORGSCOPE_BIND_ADDR";
pub const INVALID_TOKEN_VAR: &str = "ORGSCOPE_INVALID_TOKEN";
pub const ENFORCE_EXPIRY_VAR: &str = "ORGSCOPE_ENFORCE_EXPIRY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// What to do with a bearer credential that is present but unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidTokenPolicy {
    /// Continue as an anonymous request.
    #[default]
    Anonymous,
    /// Answer 401.
    Reject,
}

impl FromStr for InvalidTokenPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anonymous" => Ok(Self::Anonymous),
            "reject" => Ok(Self::Reject),
            _ => Err("expected 'anonymous' or 'reject'".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub invalid_token: InvalidTokenPolicy,
    /// Treat tokens outside their `iat`/`exp` window as invalid.
    pub enforce_expiry: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            invalid_token: InvalidTokenPolicy::default(),
            enforce_expiry: true,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid(BIND_ADDR_VAR, &bind_raw, e.to_string()))?;

        let invalid_token = match lookup(INVALID_TOKEN_VAR) {
            Some(raw) => raw
                .parse::<InvalidTokenPolicy>()
                .map_err(|reason| ConfigError::invalid(INVALID_TOKEN_VAR, &raw, reason))?,
            None => InvalidTokenPolicy::default(),
        };

        let enforce_expiry = match lookup(ENFORCE_EXPIRY_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|e| ConfigError::invalid(ENFORCE_EXPIRY_VAR, &raw, e.to_string()))?,
            None => true,
        };

        Ok(Self {
            bind_addr,
            invalid_token,
            enforce_expiry,
        })
    }
}

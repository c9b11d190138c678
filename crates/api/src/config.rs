//! Environment-driven service configuration.

use std::net::SocketAddr;

use chrono::FixedOffset;
use thiserror::Error;

pub const BIND_ADDR_ENV: &str = "COOKGENIE_BIND_ADDR";
pub const UTC_OFFSET_ENV: &str = "COOKGENIE_UTC_OFFSET_MINUTES";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the API binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Reference timezone in which "today" is evaluated for expiry checks.
    pub utc_offset: FixedOffset,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_ENV).unwrap_or_else(|| {
            tracing::debug!("{BIND_ADDR_ENV} not set, using default: {DEFAULT_BIND_ADDR}");
            DEFAULT_BIND_ADDR.to_string()
        });
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: BIND_ADDR_ENV,
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let utc_offset = match lookup(UTC_OFFSET_ENV) {
            None => utc(),
            Some(raw) => parse_offset_minutes(&raw)?,
        };

        Ok(Self {
            bind_addr,
            utc_offset,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            utc_offset: utc(),
        }
    }
}

fn parse_offset_minutes(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: UTC_OFFSET_ENV,
        value: raw.to_string(),
        reason,
    };

    let minutes: i32 = raw.trim().parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| invalid("offset must be within +/- 24 hours".to_string()))
}

fn utc() -> FixedOffset {
    chrono::Offset::fix(&chrono::Utc)
}

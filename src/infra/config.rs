//! Centralized configuration (environment variables + defaults).
//!
//! Both binaries load `.env` first, then build their config from the process
//! environment. The `from_lookup` constructors take the lookup as a closure so
//! tests do not have to mutate the real environment.

use crate::app::EmptyListPolicy;
use chrono::{Duration, Utc};
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_ITEMS_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SHOP_PORT: u16 = 4000;
pub const DEFAULT_JWT_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ItemsConfig {
    pub bind_addr: SocketAddr,
    pub empty_list_policy: EmptyListPolicy,
}

impl ItemsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("ITEMS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_ITEMS_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "ITEMS_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let empty_is_error = match lookup("ITEMS_EMPTY_LIST_IS_ERROR") {
            Some(v) => parse_bool("ITEMS_EMPTY_LIST_IS_ERROR", &v)?,
            None => true,
        };

        Ok(Self {
            bind_addr,
            empty_list_policy: if empty_is_error {
                EmptyListPolicy::Error
            } else {
                EmptyListPolicy::EmptyList
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub port: u16,
    /// PostgreSQL URL; `None` keeps users and products in memory.
    pub database_url: Option<String>,
    pub jwt_key: String,
    pub jwt_ttl: Duration,
}

impl ShopConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_SHOP_PORT,
        };

        let database_url = lookup("DB_URL").filter(|v| !v.trim().is_empty());

        let jwt_key = lookup("JWT_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("JWT_KEY"))?;

        let jwt_ttl = match lookup("JWT_TTL_MINUTES") {
            Some(v) => parse_ttl_minutes(&v)?,
            None => Duration::minutes(DEFAULT_JWT_TTL_MINUTES),
        };

        Ok(Self {
            port,
            database_url,
            jwt_key,
            jwt_ttl,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Positive, and small enough that `now + ttl` stays a representable timestamp.
fn parse_ttl_minutes(value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "JWT_TTL_MINUTES",
        reason,
    };
    let minutes = value.trim().parse::<i64>().map_err(|e| invalid(e.to_string()))?;
    if minutes <= 0 {
        return Err(invalid(format!("must be positive, got {}", minutes)));
    }
    Duration::try_minutes(minutes)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| invalid(format!("{} minutes is out of range", minutes)))
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            reason: format!("expected a boolean, got {:?}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn items_defaults() {
        let cfg = ItemsConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.empty_list_policy, EmptyListPolicy::Error);
    }

    #[test]
    fn items_empty_list_override() {
        let cfg = ItemsConfig::from_lookup(env(&[("ITEMS_EMPTY_LIST_IS_ERROR", "false")])).unwrap();
        assert_eq!(cfg.empty_list_policy, EmptyListPolicy::EmptyList);

        let err = ItemsConfig::from_lookup(env(&[("ITEMS_EMPTY_LIST_IS_ERROR", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "ITEMS_EMPTY_LIST_IS_ERROR", .. }));
    }

    #[test]
    fn shop_requires_jwt_key() {
        let err = ShopConfig::from_lookup(env(&[("PORT", "5000")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_KEY"));
    }

    #[test]
    fn shop_values() {
        let cfg = ShopConfig::from_lookup(env(&[
            ("PORT", "5000"),
            ("JWT_KEY", "k"),
            ("DB_URL", ""),
            ("JWT_TTL_MINUTES", "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 5000);
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.jwt_ttl, Duration::minutes(15));
        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn shop_ttl_bounds() {
        let cfg = ShopConfig::from_lookup(env(&[("JWT_KEY", "k")])).unwrap();
        assert_eq!(cfg.jwt_ttl, Duration::minutes(1440));

        for bad in ["0", "-5", "soon", "9223372036854775807", "200000000000"] {
            let err = ShopConfig::from_lookup(env(&[("JWT_KEY", "k"), ("JWT_TTL_MINUTES", bad)]))
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { var: "JWT_TTL_MINUTES", .. }),
                "{} accepted",
                bad
            );
        }
    }

    #[test]
    fn shop_rejects_bad_port() {
        let err = ShopConfig::from_lookup(env(&[("PORT", "http"), ("JWT_KEY", "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }
}

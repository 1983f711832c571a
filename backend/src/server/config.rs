//! Server configuration sourced from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::outbound::cache::UserCacheConfig;

/// Failures raised while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was present but did not parse.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: String,
        /// What went wrong.
        message: String,
    },
}

impl ConfigError {
    fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_owned(),
            message: message.into(),
        }
    }
}

/// Runtime configuration for the HTTP server.
///
/// Read from the environment:
/// - `DATABASE_URL` — PostgreSQL connection string; absent runs on fixtures.
/// - `BIND_ADDR` — listen address, default `0.0.0.0:8080`.
/// - `DB_POOL_MAX` — pool size, default 10.
/// - `USER_CACHE_CAPACITY` — cached user entries, default 1024.
/// - `USER_CACHE_TTL_SECS` — cached user lifetime, default 300.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string, absent when running on fixtures.
    pub database_url: Option<String>,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Maximum database pool size.
    pub db_pool_max: u32,
    /// Sizing and expiry of the API-key user cache.
    pub user_cache: UserCacheConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a present variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup, for testability.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a present variable fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("BIND_ADDR", format!("{raw} is not host:port")))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };
        let db_pool_max = parse_or(&lookup, "DB_POOL_MAX", 10)?;
        let capacity = parse_or(&lookup, "USER_CACHE_CAPACITY", 1024_usize)?;
        let ttl_secs = parse_or(&lookup, "USER_CACHE_TTL_SECS", 300_u64)?;
        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            bind_addr,
            db_pool_max,
            user_cache: UserCacheConfig {
                capacity,
                ttl: Duration::from_secs(ttl_secs),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::invalid(name, format!("{raw} does not parse"))),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| (*value).to_owned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_pool_max, 10);
        assert_eq!(config.user_cache.capacity, 1024);
        assert_eq!(config.user_cache.ttl, Duration::from_secs(300));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://terraviva@db/catalogue"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DB_POOL_MAX", "4"),
            ("USER_CACHE_CAPACITY", "16"),
            ("USER_CACHE_TTL_SECS", "30"),
        ]))
        .expect("explicit values are valid");
        assert!(config.database_url.is_some());
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.db_pool_max, 4);
        assert_eq!(config.user_cache.capacity, 16);
        assert_eq!(config.user_cache.ttl, Duration::from_secs(30));
    }

    #[test]
    fn blank_database_url_means_fixtures() {
        let config = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")]))
            .expect("blank url is valid");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("DB_POOL_MAX", "lots")]))
            .expect_err("malformed value must fail");
        assert!(err.to_string().contains("DB_POOL_MAX"));
    }
}

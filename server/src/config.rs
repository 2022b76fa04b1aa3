//! Configuration management for the todo server.
//!
//! Loads configuration from environment variables with sensible defaults.

use kv_todo::StoreConfig;
use std::env;
use std::fmt;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Redis connection settings
    pub redis: StoreConfig,
    /// Application server configuration
    pub server: ServerConfig,
    /// Secret for signing flash cookies
    pub session_secret: String,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` to bind the listener on.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            redis: StoreConfig::new(
                lookup("REDIS_HOST").unwrap_or_else(|| "localhost".to_string()),
            )
            .with_port(
                lookup("REDIS_PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(6379),
            )
            .with_db(
                lookup("REDIS_DB")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
            ),
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5005),
            },
            session_secret: lookup("SESSION_SECRET").unwrap_or_else(|| "dev-secret".to_string()),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("redis", &self.redis)
            .field("server", &self.server)
            .field("session_secret", &"<redacted>")
            .finish()
    }
}

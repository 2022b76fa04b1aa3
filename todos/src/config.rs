//! Store connection configuration.

/// Where the Redis store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Store host.
    ///
    /// Default: `localhost`
    pub host: String,

    /// Store port.
    ///
    /// Default: 6379
    pub port: u16,

    /// Logical database index.
    ///
    /// Default: 0
    pub db: i64,
}

impl StoreConfig {
    /// Create configuration for the given host with default port and database.
    #[must_use]
    pub const fn new(host: String) -> Self {
        Self {
            host,
            port: 6379,
            db: 0,
        }
    }

    /// Set the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the database index.
    #[must_use]
    pub const fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Connection URL in the form `redis://{host}:{port}/{db}`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("localhost".to_string())
    }
}

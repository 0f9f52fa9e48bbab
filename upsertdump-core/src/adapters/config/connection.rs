//! Database connection configuration.
//!
//! This module provides the `ConnectionConfig` struct for configuring the
//! single dump connection with read-only defaults.

use std::time::Duration;

/// Default socket directory used when no host is given.
pub const DEFAULT_HOST: &str = "/var/run/postgresql";

/// Default PostgreSQL port.
pub const DEFAULT_PORT: u16 = 5432;

/// Configuration for the dump connection.
///
/// # Security
/// This struct intentionally does NOT store passwords. The password is kept
/// in [`Credentials`](crate::security::Credentials) and never logged.
///
/// # Example
/// ```rust
/// use upsertdump_core::adapters::ConnectionConfig;
///
/// let config = ConnectionConfig::new("inventory".to_string())
///     .with_host("db.internal".to_string())
///     .with_port(6432)
///     .with_username("exporter".to_string());
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.to_string(), "db.internal:6432/inventory");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Host name, IP address, or Unix socket directory (leading `/`)
    pub host: String,
    /// Port number (also selects the socket file for socket directories)
    pub port: u16,
    /// Database name
    pub database: String,
    /// Optional username; the driver default (OS user) applies when unset
    pub username: Option<String>,
    /// How long to wait for the connection to be established
    pub connect_timeout: Duration,
    /// Whether to put the session into read-only mode
    pub read_only: bool,
    /// `application_name` reported to the server
    pub application_name: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: String::new(),
            username: None,
            connect_timeout: Duration::from_secs(30),
            read_only: true,
            application_name: format!("upsertdump-{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Intentionally omit username and never include credentials
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if configuration values are invalid
    pub fn validate(&self) -> crate::Result<()> {
        if self.database.is_empty() {
            return Err(crate::error::UpsertDumpError::configuration(
                "database name cannot be empty",
            ));
        }

        if self.host.is_empty() {
            return Err(crate::error::UpsertDumpError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == 0 {
            return Err(crate::error::UpsertDumpError::configuration(
                "port must be greater than 0",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(crate::error::UpsertDumpError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        if self.username.as_deref() == Some("") {
            return Err(crate::error::UpsertDumpError::configuration(
                "username cannot be empty",
            ));
        }

        Ok(())
    }

    /// Creates a new connection config for a database with safe defaults.
    pub fn new(database: String) -> Self {
        Self {
            database,
            ..Default::default()
        }
    }

    /// Whether `host` names a Unix socket directory.
    pub fn is_socket(&self) -> bool {
        self.host.starts_with('/')
    }

    /// Builder method to set host.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    /// Builder method to set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Builder method to set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

//! PostgreSQL connection setup.
//!
//! # Security Features
//! - Validates the configuration before connecting
//! - Bounds the connection attempt with `connect_timeout`
//! - Switches the session to read-only mode
//! - Reports failures against the sanitized `host:port/database` target

use super::{ConnectionConfig, PostgresAdapter};
use crate::Result;
use crate::error::UpsertDumpError;
use crate::models::DEFAULT_SCHEMA;
use crate::security::Credentials;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};

impl PostgresAdapter {
    /// Connects to PostgreSQL and prepares a read-only session.
    ///
    /// # Arguments
    /// * `config` - Connection settings (no credentials)
    /// * `credentials` - Password, if any
    /// * `schema` - Schema to dump, `public` when `None`
    ///
    /// # Errors
    /// Returns [`UpsertDumpError::Configuration`] for invalid settings and
    /// [`UpsertDumpError::Connection`] if the server cannot be reached, the
    /// login fails, the attempt times out, or the session cannot be set up.
    pub async fn connect(
        config: ConnectionConfig,
        credentials: &Credentials,
        schema: Option<String>,
    ) -> Result<Self> {
        config.validate()?;

        let options = Self::connect_options(&config, credentials);
        let target = config.to_string();

        tracing::debug!("Connecting to {}", target);

        let mut conn = tokio::time::timeout(
            config.connect_timeout,
            PgConnection::connect_with(&options),
        )
        .await
        .map_err(|elapsed| UpsertDumpError::connection_failed(target.clone(), elapsed))?
        .map_err(|e| UpsertDumpError::connection_failed(target.clone(), e))?;

        Self::setup_session(&mut conn, &config)
            .await
            .map_err(|e| UpsertDumpError::connection_failed(target.clone(), e))?;

        tracing::debug!("Connected to {}", target);

        Ok(Self {
            conn,
            config,
            schema: schema.unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
        })
    }

    /// Builds driver options from the configuration.
    ///
    /// A host starting with `/` is treated as a Unix socket directory. Unset
    /// username and password fall back to the driver's defaults.
    pub fn connect_options(
        config: &ConnectionConfig,
        credentials: &Credentials,
    ) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .port(config.port)
            .database(&config.database)
            .application_name(&config.application_name);

        options = if config.is_socket() {
            options.socket(&config.host)
        } else {
            options.host(&config.host)
        };

        if let Some(username) = &config.username {
            options = options.username(username);
        }

        if let Some(password) = credentials.password() {
            options = options.password(password);
        }

        options
    }

    /// Applies session settings before any catalog query runs.
    async fn setup_session(
        conn: &mut PgConnection,
        config: &ConnectionConfig,
    ) -> std::result::Result<(), sqlx::Error> {
        if config.read_only {
            sqlx::query("SET default_transaction_read_only = on")
                .execute(&mut *conn)
                .await?;
        }

        // Consistent text output for dates and times
        sqlx::query("SET datestyle = 'ISO, YMD'")
            .execute(&mut *conn)
            .await?;
        sqlx::query("SET intervalstyle = 'postgres'")
            .execute(&mut *conn)
            .await?;
        sqlx::query("SET extra_float_digits = 3")
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Closes the connection gracefully.
    pub async fn close(self) -> Result<()> {
        let target = self.config.to_string();
        self.conn
            .close()
            .await
            .map_err(|e| UpsertDumpError::connection_failed(target, e))
    }
}

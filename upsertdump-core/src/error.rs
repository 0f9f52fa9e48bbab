//! Error types for upsertdump operations.
//!
//! Errors never carry the connection password. Connection context is built
//! from [`ConnectionConfig`](crate::adapters::ConnectionConfig)'s `Display`,
//! which omits credentials.

use thiserror::Error;

/// Main error type for upsertdump operations.
#[derive(Debug, Error)]
pub enum UpsertDumpError {
    /// Initial database connection failed (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        /// Sanitized description of the connection target
        context: String,
        /// Underlying driver or timeout error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Catalog or row query failed while dumping
    #[error("Data collection failed: {context}")]
    Collection {
        /// What was being collected
        context: String,
        /// Underlying driver error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the invalid setting
        message: String,
    },

    /// Insufficient privileges for database operation
    #[error("Insufficient privileges: {required}")]
    InsufficientPrivileges {
        /// The access that was denied
        required: String,
    },

    /// Statement could not be generated from the fetched data
    #[error("Statement generation failed: {message}")]
    Generation {
        /// Description of the mismatch
        message: String,
    },

    /// Writing generated statements failed
    #[error("I/O operation failed: {context}")]
    Io {
        /// What was being written
        context: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with UpsertDumpError
pub type Result<T> = std::result::Result<T, UpsertDumpError>;

/// SQLSTATE for `insufficient_privilege`.
const INSUFFICIENT_PRIVILEGE: &str = "42501";

impl UpsertDumpError {
    /// Creates a connection error for the given (sanitized) target
    pub fn connection_failed<E>(target: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: target.into(),
            source: Box::new(error),
        }
    }

    /// Creates a collection error with context
    pub fn collection_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Collection {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Maps a query error, turning permission failures into
    /// [`UpsertDumpError::InsufficientPrivileges`].
    pub fn from_query(context: impl Into<String>, error: sqlx::Error) -> Self {
        let context = context.into();
        match &error {
            sqlx::Error::Database(db_err)
                if db_err.code().as_deref() == Some(INSUFFICIENT_PRIVILEGE) =>
            {
                Self::insufficient_privileges(format!("{context}: {}", db_err.message()))
            }
            _ => Self::collection_failed(context, error),
        }
    }

    /// Creates a parsing error for database column extraction
    pub fn parse_field<E>(field_name: &str, table_context: Option<&str>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let context = match table_context {
            Some(table) => format!(
                "Failed to parse field '{}' from result for table '{}'",
                field_name, table
            ),
            None => format!(
                "Failed to parse field '{}' from database result",
                field_name
            ),
        };
        Self::Collection {
            context,
            source: Box::new(error),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an insufficient privileges error
    pub fn insufficient_privileges(required: impl Into<String>) -> Self {
        Self::InsufficientPrivileges {
            required: required.into(),
        }
    }

    /// Creates a statement generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an output error
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Renders the error followed by each underlying cause.
    ///
    /// A cause whose text is already part of the message is skipped, since
    /// driver errors often repeat their inner I/O error.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }

    /// Whether the error happened before a usable connection existed.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = UpsertDumpError::configuration("database name cannot be empty");
        assert!(error.to_string().contains("database name cannot be empty"));

        let error = UpsertDumpError::insufficient_privileges("SELECT on public.accounts");
        assert!(error.to_string().contains("SELECT on public.accounts"));

        let error = UpsertDumpError::generation("2 columns but 3 values");
        assert_eq!(
            error.to_string(),
            "Statement generation failed: 2 columns but 3 values"
        );
    }

    #[test]
    fn test_connection_error_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(UpsertDumpError::connection_failed("localhost:5432/app", io).is_connection_error());
        assert!(UpsertDumpError::configuration("port must be greater than 0").is_connection_error());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!UpsertDumpError::io("stdout", io).is_connection_error());
        assert!(!UpsertDumpError::generation("mismatch").is_connection_error());
        assert!(!UpsertDumpError::insufficient_privileges("x").is_connection_error());
    }

    #[derive(Debug)]
    struct Layered {
        text: &'static str,
        inner: Option<Box<Layered>>,
    }

    impl std::fmt::Display for Layered {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.text)
        }
    }

    impl std::error::Error for Layered {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.inner
                .as_deref()
                .map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_report_includes_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let error = UpsertDumpError::connection_failed("127.0.0.1:9/app", io);

        assert_eq!(error.to_string(), "Database connection failed: 127.0.0.1:9/app");
        assert_eq!(
            error.report(),
            "Database connection failed: 127.0.0.1:9/app: Connection refused"
        );
    }

    #[test]
    fn test_report_walks_nested_causes() {
        let cause = Layered {
            text: "error communicating with database: Connection refused",
            inner: Some(Box::new(Layered {
                text: "Connection refused",
                inner: None,
            })),
        };
        let error = UpsertDumpError::collection_failed("Failed to list tables", cause);

        // The inner text is already in the outer cause, so it appears once
        assert_eq!(
            error.report(),
            "Data collection failed: Failed to list tables: \
             error communicating with database: Connection refused"
        );

        let cause = Layered {
            text: "outer",
            inner: Some(Box::new(Layered {
                text: "inner",
                inner: None,
            })),
        };
        let error = UpsertDumpError::collection_failed("ctx", cause);
        assert_eq!(error.report(), "Data collection failed: ctx: outer: inner");
    }

    #[test]
    fn test_report_without_source() {
        let error = UpsertDumpError::generation("2 columns but 3 values");
        assert_eq!(error.report(), error.to_string());
    }

    #[test]
    fn test_from_query_non_database_error() {
        let error = UpsertDumpError::from_query("Failed to list tables", sqlx::Error::RowNotFound);
        assert!(matches!(error, UpsertDumpError::Collection { .. }));
        assert!(error.to_string().contains("Failed to list tables"));
    }

    #[test]
    fn test_parse_field_context() {
        let io = std::io::Error::other("bad");
        let error = UpsertDumpError::parse_field("column_name", Some("accounts"), io);
        assert!(error.to_string().contains("column_name"));
        assert!(error.to_string().contains("accounts"));
    }
}

//! Helper utilities for the database adapter.
//!
//! Typed row extraction with consistent error context.

use crate::{Result, error::UpsertDumpError};
use sqlx::{Row, postgres::PgRow};

/// Extension trait for extracting typed values from database rows
/// with consistent error handling.
///
/// # Example
/// ```rust,ignore
/// use upsertdump_core::adapters::helpers::RowExt;
///
/// let name: String = row.get_field("column_name", Some("accounts"))?;
/// let value: Option<String> = row.get_field_at(0, "email", Some("accounts"))?;
/// ```
pub trait RowExt {
    /// Extracts a typed field by column name with error context.
    ///
    /// # Arguments
    /// * `field_name` - Name of the column to extract
    /// * `table_context` - Optional table name for error messages
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>;

    /// Extracts a typed field by position, naming the column in errors.
    fn get_field_at<'r, T>(
        &'r self,
        index: usize,
        field_name: &str,
        table_context: Option<&str>,
    ) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>;
}

impl RowExt for PgRow {
    fn get_field<'r, T>(&'r self, field_name: &str, table_context: Option<&str>) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        self.try_get(field_name)
            .map_err(|e| UpsertDumpError::parse_field(field_name, table_context, e))
    }

    fn get_field_at<'r, T>(
        &'r self,
        index: usize,
        field_name: &str,
        table_context: Option<&str>,
    ) -> Result<T>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        self.try_get(index)
            .map_err(|e| UpsertDumpError::parse_field(field_name, table_context, e))
    }
}

//! PostgreSQL implementation of [`DumpSource`].
//!
//! # Module Structure
//! - `connection`: Connecting with read-only session settings
//! - `schema_collection`: Table, column, and primary key catalog queries
//! - `rows`: Full-table row fetch
//!
//! # Security Guarantees
//! - Sessions run with `default_transaction_read_only = on`
//! - Catalog queries bind table and schema names as parameters
//! - The password is never logged or included in errors

mod connection;
mod rows;
mod schema_collection;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;

use super::{ConnectionConfig, DumpSource};
use crate::Result;
use crate::models::{Column, Row, TableDescriptor};
use async_trait::async_trait;
use sqlx::PgConnection;

pub use rows::build_select_query;

/// PostgreSQL dump source over a single connection.
pub struct PostgresAdapter {
    conn: PgConnection,
    config: ConnectionConfig,
    schema: String,
}

impl std::fmt::Debug for PostgresAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresAdapter")
            .field("config", &self.config)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DumpSource for PostgresAdapter {
    fn schema(&self) -> &str {
        &self.schema
    }

    async fn list_tables(&mut self, filter: &[String]) -> Result<Vec<String>> {
        let all_tables = self.collect_table_names().await?;
        Ok(super::filter_tables(all_tables, filter))
    }

    async fn get_columns(&mut self, table: &str) -> Result<Vec<Column>> {
        self.collect_table_columns(table).await
    }

    async fn get_primary_key(&mut self, table: &str) -> Result<Vec<String>> {
        self.collect_table_primary_key(table).await
    }

    async fn fetch_rows(&mut self, table: &TableDescriptor) -> Result<Vec<Row>> {
        rows::fetch_rows(&mut self.conn, table).await
    }
}

impl PostgresAdapter {
    /// Connection settings this adapter was created with.
    pub fn connection_config(&self) -> &ConnectionConfig {
        &self.config
    }
}

//! Database access for the dump.
//!
//! The orchestrator talks to the database only through [`DumpSource`], so
//! the dump logic can run against PostgreSQL or an in-memory fake.
//!
//! # Module Structure
//! - `config`: Connection configuration
//! - `helpers`: Row extraction helpers
//! - `postgres`: The PostgreSQL implementation

use crate::Result;
use crate::models::{Column, Row, TableDescriptor};
use async_trait::async_trait;

pub mod config;
pub mod helpers;
pub mod postgres;

pub use config::{ConnectionConfig, DEFAULT_HOST, DEFAULT_PORT};

/// Catalog and row access for one schema over one connection.
///
/// Calls are made strictly one after another; implementations hold a
/// single connection and need no internal locking.
#[async_trait]
pub trait DumpSource: Send {
    /// Schema (namespace) the source reads from.
    fn schema(&self) -> &str;

    /// Lists base tables in the schema.
    ///
    /// With a non-empty `filter`, only tables whose names appear in it are
    /// returned; filter entries that match nothing are ignored.
    async fn list_tables(&mut self, filter: &[String]) -> Result<Vec<String>>;

    /// Lists a table's columns in ordinal order.
    async fn get_columns(&mut self, table: &str) -> Result<Vec<Column>>;

    /// Lists a table's primary key columns in key order (empty if none).
    async fn get_primary_key(&mut self, table: &str) -> Result<Vec<String>>;

    /// Fetches every row of the table, values in `table.columns` order.
    async fn fetch_rows(&mut self, table: &TableDescriptor) -> Result<Vec<Row>>;
}

/// Applies a table filter to catalog results, keeping catalog order.
pub fn filter_tables(all_tables: Vec<String>, filter: &[String]) -> Vec<String> {
    if filter.is_empty() {
        return all_tables;
    }

    for wanted in filter {
        if !all_tables.contains(wanted) {
            tracing::debug!("Requested table '{}' not found, ignoring", wanted);
        }
    }

    all_tables
        .into_iter()
        .filter(|table| filter.contains(table))
        .collect()
}

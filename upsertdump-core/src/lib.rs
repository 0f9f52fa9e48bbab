//! Core library for upsertdump.
//!
//! Reads the tables of a PostgreSQL schema and renders every row as an
//! idempotent `INSERT ... ON CONFLICT (...) DO UPDATE SET ...` statement.
//! Replaying the resulting script against a database with the same schema
//! inserts missing rows and overwrites existing ones keyed by primary key.
//!
//! # Security Guarantees
//! - Sessions are read-only; the tool never writes to the source database
//! - The password is held in zeroizing memory and never logged
//! - Catalog lookups bind schema and table names as parameters
//!
//! # Architecture
//! - [`adapters`]: the [`DumpSource`] seam and its PostgreSQL implementation
//! - [`sql`]: literal escaping and statement rendering
//! - [`dump`]: the per-table orchestration loop

pub mod adapters;
pub mod dump;
pub mod error;
pub mod logging;
pub mod models;
pub mod security;
pub mod sql;

// Re-export commonly used types
pub use adapters::postgres::PostgresAdapter;
pub use adapters::{ConnectionConfig, DumpSource};
pub use dump::{DumpSummary, dump};
pub use error::{Result, UpsertDumpError};
pub use logging::init_logging;
pub use models::{Column, Row, SqlValue, TableDescriptor, ValueKind};
pub use security::Credentials;
pub use sql::{UpsertTemplate, escape_literal, generate_upsert};

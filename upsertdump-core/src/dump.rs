//! Dump orchestration.
//!
//! Walks the tables of a [`DumpSource`] one at a time and writes one upsert
//! statement per row to the output. Progress goes to the log; the output
//! receives statements only.
//!
//! Any error aborts the whole dump. Statements already written for earlier
//! tables stay written, but nothing more is emitted for the failing table.

use crate::Result;
use crate::adapters::DumpSource;
use crate::error::UpsertDumpError;
use crate::models::TableDescriptor;
use crate::sql::UpsertTemplate;
use std::io::Write;
use tracing::{info, warn};

/// Counters reported at the end of a dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Tables processed, including empty ones
    pub tables: usize,
    /// Tables that had no rows
    pub empty_tables: usize,
    /// Tables dumped without a primary key
    pub tables_without_primary_key: usize,
    /// Statements written to the output
    pub statements: usize,
}

/// Dumps every table (or the filtered subset) as upsert statements.
///
/// # Arguments
/// * `source` - Catalog and row access
/// * `filter` - Table names to restrict to; empty means all tables
/// * `out` - Destination for statements, one per line
///
/// # Errors
/// Returns the first catalog, fetch, generation, or write error.
pub async fn dump<S, W>(source: &mut S, filter: &[String], out: &mut W) -> Result<DumpSummary>
where
    S: DumpSource + ?Sized,
    W: Write,
{
    let tables = source.list_tables(filter).await?;

    let mut summary = DumpSummary::default();

    info!("Tables in the database:");
    for table_name in tables {
        let written = dump_table(source, table_name, out, &mut summary).await?;
        summary.statements = summary.statements.saturating_add(written);
        summary.tables = summary.tables.saturating_add(1);
    }

    out.flush()
        .map_err(|e| UpsertDumpError::io("Failed to flush statements", e))?;

    Ok(summary)
}

async fn dump_table<S, W>(
    source: &mut S,
    table_name: String,
    out: &mut W,
    summary: &mut DumpSummary,
) -> Result<usize>
where
    S: DumpSource + ?Sized,
    W: Write,
{
    info!("Table: {}", table_name);

    let columns = source.get_columns(&table_name).await?;
    let primary_key = source.get_primary_key(&table_name).await?;
    let table = TableDescriptor {
        schema: source.schema().to_string(),
        name: table_name,
        columns,
        primary_key,
    };

    info!("Columns: {}", table.column_names().join(", "));

    let rows = source.fetch_rows(&table).await?;

    if rows.is_empty() {
        info!("No data in the table");
        summary.empty_tables = summary.empty_tables.saturating_add(1);
        return Ok(0);
    }

    if !table.has_primary_key() {
        warn!(
            "Table {} has no primary key; its statements have an empty conflict target",
            table
        );
        summary.tables_without_primary_key = summary.tables_without_primary_key.saturating_add(1);
    }

    info!("Dumping data for table {}", table.name);

    let template = UpsertTemplate::for_table(&table);
    for row in &rows {
        let statement = template.render(row)?;
        writeln!(out, "{statement}").map_err(|e| {
            UpsertDumpError::io(format!("Failed to write statement for {}", table), e)
        })?;
    }

    Ok(rows.len())
}

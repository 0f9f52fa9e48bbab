//! Full-table row fetch.
//!
//! Every column is selected as `text`, so any PostgreSQL type can be read
//! back and re-inserted through its own input function. The whole result
//! set is held in memory; there is no cursor paging.

use crate::Result;
use crate::adapters::helpers::RowExt;
use crate::error::UpsertDumpError;
use crate::models::{Row, SqlValue, TableDescriptor, ValueKind};
use crate::sql::force_quote_identifier;
use sqlx::PgConnection;

/// Builds the `SELECT` that reads a table's rows in column order.
///
/// # Example
/// ```rust
/// use upsertdump_core::adapters::postgres::build_select_query;
/// use upsertdump_core::models::{Column, TableDescriptor};
///
/// let table = TableDescriptor {
///     schema: "public".to_string(),
///     name: "accounts".to_string(),
///     columns: vec![Column::new("id", "integer"), Column::new("email", "text")],
///     primary_key: vec!["id".to_string()],
/// };
/// assert_eq!(
///     build_select_query(&table),
///     r#"SELECT "id"::text, "email"::text FROM "public"."accounts""#
/// );
/// ```
pub fn build_select_query(table: &TableDescriptor) -> String {
    let select_list = table
        .columns
        .iter()
        .map(|c| format!("{}::text", force_quote_identifier(&c.name)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "SELECT {} FROM {}.{}",
        select_list,
        force_quote_identifier(&table.schema),
        force_quote_identifier(&table.name)
    )
}

/// Fetches all rows of a table as classified values.
pub(crate) async fn fetch_rows(
    conn: &mut PgConnection,
    table: &TableDescriptor,
) -> Result<Vec<Row>> {
    let query = build_select_query(table);
    tracing::trace!("Fetching rows for {} with query: {}", table, query);

    let pg_rows = sqlx::query(&query)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            UpsertDumpError::from_query(format!("Failed to fetch rows from {}", table), e)
        })?;

    let kinds: Vec<ValueKind> = table.columns.iter().map(|c| c.value_kind()).collect();

    let mut rows = Vec::with_capacity(pg_rows.len());
    for pg_row in &pg_rows {
        let mut row = Vec::with_capacity(kinds.len());
        for (index, (column, kind)) in table.columns.iter().zip(&kinds).enumerate() {
            let text: Option<String> =
                pg_row.get_field_at(index, &column.name, Some(&table.name))?;
            row.push(SqlValue::from_text(*kind, text));
        }
        rows.push(row);
    }

    tracing::debug!("Fetched {} rows from {}", rows.len(), table);

    Ok(rows)
}

//! PostgreSQL catalog queries.
//!
//! All lookups go through `information_schema` and are scoped to the
//! adapter's schema. Identifiers are bound as parameters and every
//! `sql_identifier` result is cast to `text` for decoding.

use super::PostgresAdapter;
use crate::Result;
use crate::adapters::helpers::RowExt;
use crate::error::UpsertDumpError;
use crate::models::Column;

const TABLES_QUERY: &str = r#"
    SELECT table_name::text AS table_name
    FROM information_schema.tables
    WHERE table_schema = $1
    AND table_type = 'BASE TABLE'
    ORDER BY table_name
"#;

const COLUMNS_QUERY: &str = r#"
    SELECT
        column_name::text AS column_name,
        data_type::text AS data_type
    FROM information_schema.columns
    WHERE table_schema = $1
    AND table_name = $2
    ORDER BY ordinal_position
"#;

const PRIMARY_KEY_QUERY: &str = r#"
    SELECT column_name::text AS column_name
    FROM information_schema.table_constraints
    JOIN information_schema.key_column_usage
        USING (constraint_catalog, constraint_schema, constraint_name,
               table_catalog, table_schema, table_name)
    WHERE constraint_type = 'PRIMARY KEY'
    AND table_schema = $1
    AND table_name = $2
    ORDER BY ordinal_position
"#;

impl PostgresAdapter {
    /// Lists base table names in the adapter's schema, ordered by name
    pub(crate) async fn collect_table_names(&mut self) -> Result<Vec<String>> {
        tracing::debug!("Enumerating tables in schema '{}'", self.schema);

        let rows = sqlx::query(TABLES_QUERY)
            .bind(&self.schema)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| {
                UpsertDumpError::from_query(
                    format!("Failed to enumerate tables in schema '{}'", self.schema),
                    e,
                )
            })?;

        rows.iter()
            .map(|row| row.get_field("table_name", None))
            .collect()
    }

    /// Collects column names and data types in ordinal order
    pub(crate) async fn collect_table_columns(&mut self, table_name: &str) -> Result<Vec<Column>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(&self.schema)
            .bind(table_name)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| {
                UpsertDumpError::from_query(
                    format!(
                        "Failed to collect columns for table '{}.{}'",
                        self.schema, table_name
                    ),
                    e,
                )
            })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.get_field("column_name", Some(table_name))?;
            let data_type: String = row.get_field("data_type", Some(table_name))?;
            columns.push(Column { name, data_type });
        }

        tracing::trace!(
            "Collected {} columns for '{}.{}'",
            columns.len(),
            self.schema,
            table_name
        );

        Ok(columns)
    }

    /// Collects primary key columns in key order; empty when there is none
    pub(crate) async fn collect_table_primary_key(
        &mut self,
        table_name: &str,
    ) -> Result<Vec<String>> {
        let rows = sqlx::query(PRIMARY_KEY_QUERY)
            .bind(&self.schema)
            .bind(table_name)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|e| {
                UpsertDumpError::from_query(
                    format!(
                        "Failed to collect primary key for table '{}.{}'",
                        self.schema, table_name
                    ),
                    e,
                )
            })?;

        rows.iter()
            .map(|row| row.get_field("column_name", Some(table_name)))
            .collect()
    }
}

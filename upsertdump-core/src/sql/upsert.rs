//! Upsert statement generation.
//!
//! Every statement has the form
//!
//! ```text
//! INSERT INTO <table> (<cols>) VALUES (<vals>) ON CONFLICT (<pk>) DO UPDATE SET <col> = EXCLUDED.<col>, ...;
//! ```
//!
//! Primary key columns are included in the SET list. A table without a
//! primary key yields `ON CONFLICT ()`, which PostgreSQL rejects; callers
//! are expected to warn about such tables.

use super::escape::{escape_value, quote_identifier};
use crate::models::{DEFAULT_SCHEMA, SqlValue, TableDescriptor};
use crate::{Result, error::UpsertDumpError};

/// Renders the table reference used in generated statements.
///
/// Tables in the default schema are left unqualified.
pub fn qualified_table_name(schema: &str, table: &str) -> String {
    if schema == DEFAULT_SCHEMA {
        quote_identifier(table).into_owned()
    } else {
        format!("{}.{}", quote_identifier(schema), quote_identifier(table))
    }
}

/// Pre-rendered parts of a table's upsert statement.
///
/// Built once per table; only the VALUES list changes from row to row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertTemplate {
    target: String,
    column_list: String,
    conflict_target: String,
    assignments: String,
    width: usize,
}

impl UpsertTemplate {
    /// Creates a template for an already rendered table reference.
    pub fn new<C, K>(target: impl Into<String>, columns: &[C], primary_key: &[K]) -> Self
    where
        C: AsRef<str>,
        K: AsRef<str>,
    {
        let quoted: Vec<String> = columns
            .iter()
            .map(|c| quote_identifier(c.as_ref()).into_owned())
            .collect();

        let conflict_target = primary_key
            .iter()
            .map(|k| quote_identifier(k.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");

        let assignments = quoted
            .iter()
            .map(|c| format!("{c} = EXCLUDED.{c}"))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            target: target.into(),
            column_list: quoted.join(", "),
            conflict_target,
            assignments,
            width: columns.len(),
        }
    }

    /// Creates the template for a described table.
    pub fn for_table(table: &TableDescriptor) -> Self {
        Self::new(
            qualified_table_name(&table.schema, &table.name),
            &table.column_names(),
            &table.primary_key,
        )
    }

    /// Renders the statement for one row, without a trailing newline.
    ///
    /// # Errors
    /// Returns [`UpsertDumpError::Generation`] if the row does not have one
    /// value per column.
    pub fn render(&self, row: &[SqlValue]) -> Result<String> {
        if row.len() != self.width {
            return Err(UpsertDumpError::generation(format!(
                "table {} has {} columns but the row has {} values",
                self.target,
                self.width,
                row.len()
            )));
        }

        let values = row.iter().map(escape_value).collect::<Vec<_>>().join(", ");

        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {};",
            self.target, self.column_list, values, self.conflict_target, self.assignments
        ))
    }
}

/// Generates the upsert statement for a single row.
///
/// # Example
/// ```rust
/// use upsertdump_core::models::SqlValue;
/// use upsertdump_core::sql::generate_upsert;
///
/// let stmt = generate_upsert(
///     "t",
///     &["id", "name"],
///     &["id"],
///     &[SqlValue::Numeric("1".into()), SqlValue::Text("O'Brien".into())],
/// )
/// .unwrap();
/// assert_eq!(
///     stmt,
///     "INSERT INTO t (id, name) VALUES (1, 'O''Brien') ON CONFLICT (id) \
///      DO UPDATE SET id = EXCLUDED.id, name = EXCLUDED.name;"
/// );
/// ```
pub fn generate_upsert<C, K>(
    table_name: &str,
    column_names: &[C],
    primary_key: &[K],
    row: &[SqlValue],
) -> Result<String>
where
    C: AsRef<str>,
    K: AsRef<str>,
{
    UpsertTemplate::new(quote_identifier(table_name), column_names, primary_key).render(row)
}

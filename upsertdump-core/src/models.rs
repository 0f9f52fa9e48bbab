//! Core data models for a single table dump.
//!
//! Every value here is built from catalog metadata or a row fetch for one
//! table and dropped once that table's statements are written.

use std::fmt;

/// Schema dumped when none is requested.
pub const DEFAULT_SCHEMA: &str = "public";

/// Database column information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name as stored in the catalog
    pub name: String,
    /// `information_schema.columns.data_type` for the column
    pub data_type: String,
}

impl Column {
    /// Creates a column with the given catalog data type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// How fetched values of this column are rendered as literals.
    pub fn value_kind(&self) -> ValueKind {
        ValueKind::from_data_type(&self.data_type)
    }
}

/// Everything needed to generate upserts for one table.
///
/// Column order here is the order rows are fetched in and the order of
/// the generated INSERT column list; values are matched by position only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    /// Schema (namespace) the table lives in
    pub schema: String,
    /// Table name
    pub name: String,
    /// Columns in ordinal order
    pub columns: Vec<Column>,
    /// Primary key columns in key order, empty if the table has none
    pub primary_key: Vec<String>,
}

impl TableDescriptor {
    /// Column names in fetch order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether the generated conflict target will be empty.
    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }
}

impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// Classification of a column's values for literal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Character types, rendered as quoted literals
    Text,
    /// Integer, decimal and floating point types, rendered bare
    Numeric,
    /// `boolean`, rendered as `true`/`false`
    Boolean,
    /// Any other type, rendered as a quoted literal of its text form
    Other,
}

impl ValueKind {
    /// Maps an `information_schema` data type to a value kind.
    pub fn from_data_type(data_type: &str) -> Self {
        match data_type.to_lowercase().as_str() {
            "smallint" | "integer" | "bigint" | "numeric" | "decimal" | "real"
            | "double precision" => Self::Numeric,
            "boolean" => Self::Boolean,
            "text" | "character varying" | "varchar" | "character" | "char" | "name"
            | "\"char\"" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// A single fetched column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// Character data
    Text(String),
    /// Numeric value in the server's text form (e.g. `42`, `3.14`, `NaN`)
    Numeric(String),
    /// Boolean value
    Boolean(bool),
    /// Any other type in the server's text form
    Other(String),
}

impl SqlValue {
    /// Builds a value from a column fetched as `text`.
    ///
    /// Boolean text that is not recognised falls back to [`SqlValue::Other`]
    /// so the server still gets to interpret it on insert.
    pub fn from_text(kind: ValueKind, text: Option<String>) -> Self {
        let Some(text) = text else {
            return Self::Null;
        };

        match kind {
            ValueKind::Text => Self::Text(text),
            ValueKind::Numeric => Self::Numeric(text),
            ValueKind::Boolean => match text.as_str() {
                "true" | "t" => Self::Boolean(true),
                "false" | "f" => Self::Boolean(false),
                _ => Self::Other(text),
            },
            ValueKind::Other => Self::Other(text),
        }
    }
}

/// One fetched row, positionally aligned with [`TableDescriptor::columns`].
pub type Row = Vec<SqlValue>;

//! Literal and identifier rendering for PostgreSQL.
//!
//! String literals follow libpq's `PQescapeLiteral`: quotes are doubled, and
//! a value containing a backslash is written as an escape string (`E'...'`)
//! with backslashes doubled too. The result reads back identically whether
//! or not the server has `standard_conforming_strings` enabled.

use crate::models::SqlValue;
use std::borrow::Cow;

/// PostgreSQL keywords that cannot be used as bare column or table names.
const RESERVED_KEYWORDS: &[&str] = &[
    "all",
    "analyse",
    "analyze",
    "and",
    "any",
    "array",
    "as",
    "asc",
    "asymmetric",
    "authorization",
    "binary",
    "both",
    "case",
    "cast",
    "check",
    "collate",
    "collation",
    "column",
    "concurrently",
    "constraint",
    "create",
    "cross",
    "current_catalog",
    "current_date",
    "current_role",
    "current_schema",
    "current_time",
    "current_timestamp",
    "current_user",
    "default",
    "deferrable",
    "desc",
    "distinct",
    "do",
    "else",
    "end",
    "except",
    "false",
    "fetch",
    "for",
    "foreign",
    "freeze",
    "from",
    "full",
    "grant",
    "group",
    "having",
    "ilike",
    "in",
    "initially",
    "inner",
    "intersect",
    "into",
    "is",
    "isnull",
    "join",
    "lateral",
    "leading",
    "left",
    "like",
    "limit",
    "localtime",
    "localtimestamp",
    "natural",
    "not",
    "notnull",
    "null",
    "offset",
    "on",
    "only",
    "or",
    "order",
    "outer",
    "overlaps",
    "placing",
    "primary",
    "references",
    "returning",
    "right",
    "select",
    "session_user",
    "similar",
    "some",
    "symmetric",
    "system_user",
    "table",
    "tablesample",
    "then",
    "to",
    "trailing",
    "true",
    "union",
    "unique",
    "user",
    "using",
    "variadic",
    "verbose",
    "when",
    "where",
    "window",
    "with",
];

/// Renders a value as a SQL literal.
///
/// # Example
/// ```rust
/// use upsertdump_core::models::SqlValue;
/// use upsertdump_core::sql::escape_value;
///
/// assert_eq!(escape_value(&SqlValue::Null), "NULL");
/// assert_eq!(escape_value(&SqlValue::Numeric("42".into())), "42");
/// assert_eq!(escape_value(&SqlValue::Text("O'Brien".into())), "'O''Brien'");
/// ```
pub fn escape_value(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Text(text) | SqlValue::Other(text) => escape_literal(text),
        SqlValue::Numeric(text) if is_bare_number(text) => text.clone(),
        // NaN and the infinities only parse as quoted literals
        SqlValue::Numeric(text) => escape_literal(text),
        SqlValue::Boolean(true) => "true".to_string(),
        SqlValue::Boolean(false) => "false".to_string(),
    }
}

/// Quotes a string as a PostgreSQL string literal.
pub fn escape_literal(text: &str) -> String {
    let has_backslash = text.contains('\\');
    let mut literal = String::with_capacity(text.len().saturating_add(3));

    if has_backslash {
        literal.push('E');
    }
    literal.push('\'');
    for ch in text.chars() {
        if ch == '\'' || (has_backslash && ch == '\\') {
            literal.push(ch);
        }
        literal.push(ch);
    }
    literal.push('\'');

    literal
}

/// Quotes an identifier only when PostgreSQL would otherwise misread it.
///
/// Plain lower-case names that are not reserved keywords are returned
/// unchanged, so `accounts` stays `accounts` while `Accounts` becomes
/// `"Accounts"` and `order` becomes `"order"`.
pub fn quote_identifier(ident: &str) -> Cow<'_, str> {
    if is_plain_identifier(ident) {
        Cow::Borrowed(ident)
    } else {
        Cow::Owned(force_quote_identifier(ident))
    }
}

/// Always double-quotes an identifier, doubling embedded quotes.
pub fn force_quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
        && !RESERVED_KEYWORDS.contains(&ident)
}

fn is_bare_number(text: &str) -> bool {
    !text.is_empty()
        && text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

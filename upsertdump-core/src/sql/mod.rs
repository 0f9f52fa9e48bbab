//! SQL text rendering: literal escaping and upsert statement generation.

mod escape;
mod upsert;

pub use escape::{escape_literal, escape_value, force_quote_identifier, quote_identifier};
pub use upsert::{UpsertTemplate, generate_upsert, qualified_table_name};

use tree_sitter::{Language, Query};

pub const RUST_QUERIES: &str = include_str!("rust.scm");

/// Compiles the declaration query for Rust.
pub fn declaration_query(lang: &Language) -> Result<Query, String> {
    Query::new(lang, RUST_QUERIES).map_err(|e| format!("query compilation error for rust: {e}"))
}

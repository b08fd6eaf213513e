//! Statement classification.

use serde::{Deserialize, Serialize};

use super::{find_keyword, ident_after};

/// Kind of operation a statement performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// `SELECT ...` — translated to a `find` action.
    Select,
    /// `INSERT ...` — translated to an `insertOne` action.
    Insert,
    /// `UPDATE ...` — translated to an `updateMany` action.
    Update,
    /// `DELETE ...` — translated to a `deleteMany` action.
    Delete,
    /// Anything else. Never executed; surfaces as a parse error.
    Other,
}

/// A classified statement: the raw text plus what it does and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// The statement text, trimmed.
    pub raw: String,
    /// Operation kind.
    pub operation: Operation,
    /// Target collection, or `"unknown"` when no collection pattern matched.
    pub collection: String,
}

/// Collection patterns, in priority order. First match wins.
const COLLECTION_KEYWORDS: [&str; 4] = ["FROM", "INTO", "UPDATE", "TABLE"];

/// Classifies a statement by keyword scanning.
///
/// Pure over the input string. Unrecognized text yields
/// [`Operation::Other`] / `"unknown"` rather than an error; execution paths
/// refuse to run such statements.
#[must_use]
pub fn classify(sql: &str) -> Statement {
    let trimmed = sql.trim();

    let first = trimmed
        .split_whitespace()
        .next()
        .map(str::to_ascii_uppercase)
        .unwrap_or_default();
    let operation = match first.as_str() {
        "SELECT" => Operation::Select,
        "INSERT" => Operation::Insert,
        "UPDATE" => Operation::Update,
        "DELETE" => Operation::Delete,
        _ => Operation::Other,
    };

    let collection = COLLECTION_KEYWORDS
        .iter()
        .find_map(|kw| {
            find_keyword(trimmed, kw).and_then(|pos| ident_after(trimmed, pos + kw.len()))
        })
        .unwrap_or_else(|| "unknown".to_string());

    Statement {
        raw: trimmed.to_string(),
        operation,
        collection,
    }
}

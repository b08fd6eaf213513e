//! INSERT column/value pairing into a store document.

use serde_json::{Map, Value};

use super::{find_keyword, unquote_ident, Params};
use crate::error::{Error, Result};

/// Builds the document an INSERT statement describes.
///
/// In named-parameter mode (a single object) the object is already keyed by
/// column name and is returned verbatim. Positional parameters are zipped
/// against the column list preceding `VALUES`; a column with no corresponding
/// parameter is omitted, never defaulted to null.
pub fn build_document(sql: &str, params: &Params) -> Result<Map<String, Value>> {
    if let Some(object) = params.as_named() {
        return Ok(object.clone());
    }

    let columns = insert_columns(sql)?;
    let values = params.as_positional().unwrap_or(&[]);

    let mut document = Map::new();
    for (i, column) in columns.iter().enumerate() {
        if let Some(value) = values.get(i) {
            document.insert(column.clone(), value.clone());
        }
    }
    Ok(document)
}

/// The parenthesized column list immediately preceding `VALUES`.
fn insert_columns(sql: &str) -> Result<Vec<String>> {
    let values_pos = find_keyword(sql, "VALUES")
        .ok_or_else(|| Error::Parse(format!("INSERT without VALUES clause: '{}'", sql.trim())))?;
    let head = &sql[..values_pos];

    let open = head
        .find('(')
        .ok_or_else(|| Error::Parse(format!("INSERT without column list: '{}'", sql.trim())))?;
    let close = head
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| Error::Parse(format!("Unclosed column list: '{}'", sql.trim())))?;

    let columns: Vec<String> = head[open + 1..close]
        .split(',')
        .map(unquote_ident)
        .filter(|column| !column.is_empty())
        .collect();
    if columns.is_empty() {
        return Err(Error::Parse(format!(
            "INSERT requires at least one target column: '{}'",
            sql.trim()
        )));
    }
    Ok(columns)
}

//! UPDATE SET-clause extraction into a partial-update document.

use serde_json::{Map, Value};
use tracing::warn;

use super::{find_keyword, unquote_ident, Params};
use crate::error::{Error, Result};

/// Builds the partial-update document an UPDATE statement describes.
///
/// Field names come from the `<field> =` assignments between `SET` and
/// `WHERE`; only fields present in the named-parameter object are included.
///
/// Named-parameter mode only. Positional parameters produce an empty update
/// (a no-op at the store), logged at `warn!` — whether any call site depends
/// on that is still unverified, so the behavior is kept observable rather
/// than turned into an error.
pub fn build_update(sql: &str, params: &Params) -> Result<Map<String, Value>> {
    let set_pos = find_keyword(sql, "SET")
        .ok_or_else(|| Error::Parse(format!("UPDATE without SET clause: '{}'", sql.trim())))?;
    let rest = &sql[set_pos + "SET".len()..];
    let end = find_keyword(rest, "WHERE").unwrap_or(rest.len());
    let assignments = &rest[..end];

    let Some(object) = params.as_named() else {
        warn!(
            "positional parameters in UPDATE '{}' produce an empty update",
            sql.trim()
        );
        return Ok(Map::new());
    };

    let mut update = Map::new();
    for assignment in assignments.split(',') {
        let field = assignment
            .split('=')
            .next()
            .map(unquote_ident)
            .unwrap_or_default();
        if field.is_empty() {
            continue;
        }
        if let Some(value) = object.get(&field) {
            update.insert(field, value.clone());
        }
    }
    Ok(update)
}

//! WHERE-clause extraction into a document-store filter.

use serde_json::{json, Map, Value};
use tracing::warn;

use super::{find_keyword, unquote_ident, Params};
use crate::error::{Error, Result};

/// Builds a store filter from a statement's WHERE clause.
///
/// Supported shapes, in priority order:
///
/// 1. `WHERE <field> IN (?, ?, ...)` → `{field: {"$in": [params...]}}`
/// 2. `WHERE <field> = ?` → `{field: params[0]}` (named placeholders
///    `:name` / `@name` / `$name` resolve against a named-parameter object)
/// 3. legacy fallback: a clause mentioning the literal field `accessKey`
///    with one positional parameter, kept for one known call site
/// 4. no WHERE clause at all → empty filter (matches every document)
///
/// Anything else — in particular multi-predicate `AND`/`OR` clauses and
/// comparison operators other than `=`/`IN` — returns
/// [`Error::UnsupportedPredicate`]. An unparseable predicate must never
/// silently widen into a match-all filter: on an UPDATE or DELETE that would
/// rewrite the whole collection.
pub fn build_filter(sql: &str, params: &Params) -> Result<Map<String, Value>> {
    let mut filter = Map::new();

    let Some(where_pos) = find_keyword(sql, "WHERE") else {
        return Ok(filter);
    };
    let rest = &sql[where_pos + "WHERE".len()..];
    let mut end = rest.len();
    for kw in ["ORDER", "LIMIT"] {
        if let Some(pos) = find_keyword(rest, kw) {
            end = end.min(pos);
        }
    }
    let clause = rest[..end].trim();
    if clause.is_empty() {
        return Ok(filter);
    }

    if find_keyword(clause, "AND").is_some() || find_keyword(clause, "OR").is_some() {
        return Err(Error::UnsupportedPredicate(format!(
            "multi-predicate WHERE clause '{clause}'"
        )));
    }

    if let Some((field, values)) = match_in_list(clause, params) {
        filter.insert(field, json!({ "$in": values }));
        return Ok(filter);
    }

    if let Some((field, value)) = match_equality(clause, params) {
        filter.insert(field, value);
        return Ok(filter);
    }

    // Legacy call site compatibility. New predicate shapes get a named
    // pattern above with a test, not another special case here.
    if clause.contains("accessKey") {
        if let Some(value) = first_positional(params) {
            warn!("WHERE clause '{clause}' handled via legacy accessKey fallback");
            filter.insert("accessKey".to_string(), value.clone());
            return Ok(filter);
        }
    }

    Err(Error::UnsupportedPredicate(format!(
        "WHERE clause '{clause}' is not a supported shape"
    )))
}

/// `<field> IN (?, ...)` — all positional parameters become the `$in` list.
fn match_in_list(clause: &str, params: &Params) -> Option<(String, Vec<Value>)> {
    let in_pos = find_keyword(clause, "IN")?;
    let field = trailing_ident(&clause[..in_pos])?;
    if !clause[in_pos + 2..].trim_start().starts_with('(') {
        return None;
    }
    let values = params.as_positional()?.to_vec();
    Some((field, values))
}

/// `<field> = ?` or `<field> = :name`.
fn match_equality(clause: &str, params: &Params) -> Option<(String, Value)> {
    let eq_pos = clause.find('=')?;
    let field = trailing_ident(&clause[..eq_pos])?;
    let rhs = clause[eq_pos + 1..].trim();

    if rhs == "?" {
        return first_positional(params).map(|v| (field, v.clone()));
    }
    if let Some(name) = rhs
        .strip_prefix(':')
        .or_else(|| rhs.strip_prefix('@'))
        .or_else(|| rhs.strip_prefix('$'))
    {
        return params.as_named()?.get(name).map(|v| (field, v.clone()));
    }
    None
}

fn first_positional(params: &Params) -> Option<&Value> {
    params.as_positional().and_then(<[Value]>::first)
}

/// The identifier ending at the end of `text`, if any.
fn trailing_ident(text: &str) -> Option<String> {
    let trimmed = text.trim_end();
    let start = trimmed
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .map_or(0, |i| i + 1);
    let ident = unquote_ident(&trimmed[start..]);
    if ident.is_empty() {
        None
    } else {
        Some(ident)
    }
}

//! Client-side ORDER BY / LIMIT post-processing.
//!
//! The store's `find` action returns documents in store order; sorting and
//! truncation happen here, after the response. Only a single sort key is
//! supported; additional ORDER BY keys are ignored.

use std::cmp::Ordering;

use serde_json::Value;

use super::{find_keyword, token_after, unquote_ident};

struct SortSpec {
    field: String,
    descending: bool,
}

fn order_by(sql: &str) -> Option<SortSpec> {
    let order_pos = find_keyword(sql, "ORDER")?;
    let (by, after_by) = token_after(sql, order_pos + "ORDER".len())?;
    if !by.eq_ignore_ascii_case("BY") {
        return None;
    }
    let (field_token, after_field) = token_after(sql, after_by)?;
    let field = unquote_ident(field_token.trim_end_matches(','));
    if field.is_empty() {
        return None;
    }
    let descending = token_after(sql, after_field)
        .is_some_and(|(token, _)| token.trim_end_matches(',').eq_ignore_ascii_case("DESC"));
    Some(SortSpec { field, descending })
}

fn limit(sql: &str) -> Option<usize> {
    let limit_pos = find_keyword(sql, "LIMIT")?;
    let (token, _) = token_after(sql, limit_pos + "LIMIT".len())?;
    token.trim_end_matches(';').parse().ok()
}

/// Applies the statement's ORDER BY and LIMIT clauses to a result set.
///
/// Stable sort: ties keep store-returned order. When both clauses are
/// present, truncation happens after sorting. Idempotent under
/// re-application with the same statement.
#[must_use]
pub fn apply_sort_and_limit(mut rows: Vec<Value>, sql: &str) -> Vec<Value> {
    if let Some(sort) = order_by(sql) {
        rows.sort_by(|a, b| {
            let left = a.get(&sort.field);
            let right = b.get(&sort.field);
            if sort.descending {
                compare_values(right, left)
            } else {
                compare_values(left, right)
            }
        });
    }
    if let Some(n) = limit(sql) {
        rows.truncate(n);
    }
    rows
}

/// Total order over optional JSON values: missing/null < bool < number <
/// string < array < object. Cross-type comparisons never panic.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

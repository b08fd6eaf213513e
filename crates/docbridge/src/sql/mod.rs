//! Scanning of the supported SQL subset.
//!
//! This is deliberately not a grammar. The shim translates the handful of
//! statement shapes its call sites actually use (single-predicate
//! SELECT/INSERT/UPDATE/DELETE); anything else degrades to
//! [`Operation::Other`] / `"unknown"` and is refused at execution time
//! instead of guessed at.

mod document;
mod filter;
mod params;
mod post;
mod statement;
mod update;

pub use document::build_document;
pub use filter::build_filter;
pub use params::Params;
pub use post::apply_sort_and_limit;
pub use statement::{classify, Operation, Statement};
pub use update::build_update;

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Finds a case-insensitive, whole-word occurrence of `keyword` and returns
/// its byte offset. `keyword` must be ASCII uppercase.
pub(crate) fn find_keyword(sql: &str, keyword: &str) -> Option<usize> {
    let upper = sql.to_ascii_uppercase();
    let mut start = 0;
    while let Some(idx) = upper[start..].find(keyword) {
        let pos = start + idx;
        let end = pos + keyword.len();
        let before_ok = pos == 0 || !is_ident_char(upper[..pos].chars().next_back().unwrap_or(' '));
        let after_ok = end >= upper.len() || !is_ident_char(upper[end..].chars().next().unwrap_or(' '));
        if before_ok && after_ok {
            return Some(pos);
        }
        start = end;
    }
    None
}

/// Reads the identifier that starts at or after `from`, unwrapping one level
/// of backtick or double-quote quoting.
pub(crate) fn ident_after(sql: &str, from: usize) -> Option<String> {
    let rest = sql.get(from..)?.trim_start();
    let rest = rest
        .strip_prefix('`')
        .or_else(|| rest.strip_prefix('"'))
        .unwrap_or(rest);
    let end = rest.find(|c| !is_ident_char(c)).unwrap_or(rest.len());
    if end == 0 {
        None
    } else {
        Some(rest[..end].to_string())
    }
}

/// Next whitespace-delimited token after `from`, with the offset past it.
pub(crate) fn token_after(sql: &str, from: usize) -> Option<(&str, usize)> {
    let rest = sql.get(from..)?;
    let start = rest.find(|c: char| !c.is_whitespace())?;
    let token = &rest[start..];
    let len = token
        .find(char::is_whitespace)
        .unwrap_or_else(|| token.len());
    Some((&token[..len], from + start + len))
}

/// Strips quoting characters from an identifier token.
pub(crate) fn unquote_ident(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '`' || c == '"' || c == '[' || c == ']')
        .to_string()
}

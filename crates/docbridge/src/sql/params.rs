//! Bound parameters for statement invocation.

use serde_json::{Map, Value};

/// Parameters bound to one invocation of a prepared statement.
///
/// Call sites either pass positional `?` bindings in order, or a single
/// object keyed by column name (named-parameter mode). Values pass through
/// to the store unchanged; no coercion is performed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Params {
    /// No bound parameters.
    #[default]
    None,
    /// Positional `?` bindings, in order.
    Positional(Vec<Value>),
    /// A single named-parameter object keyed by column name.
    Named(Map<String, Value>),
}

impl Params {
    pub(crate) fn as_positional(&self) -> Option<&[Value]> {
        match self {
            Self::Positional(values) => Some(values),
            _ => None,
        }
    }

    pub(crate) fn as_named(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Named(object) => Some(object),
            _ => None,
        }
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Self::Positional(values)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(object: Map<String, Value>) -> Self {
        Self::Named(object)
    }
}

impl From<Value> for Params {
    /// An object becomes named parameters; any other value becomes a single
    /// positional binding.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(object) => Self::Named(object),
            other => Self::Positional(vec![other]),
        }
    }
}

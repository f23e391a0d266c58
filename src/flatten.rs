use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Separator placed between nested object keys in a flattened path
pub const PATH_SEPARATOR: &str = " / ";

/// Flattened view of one JSON document: path -> display value, ordered by path.
pub type FlatRecord = BTreeMap<String, FlatValue>;

/// A display-ready leaf of a flattened document
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
    /// A string list joined with `", "`
    Joined(String),
    /// Any other list, kept as pretty-printed JSON
    Json(String),
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Text(s) | FlatValue::Joined(s) | FlatValue::Json(s) => f.write_str(s),
            FlatValue::Number(n) => write!(f, "{}", n),
            FlatValue::Bool(b) => write!(f, "{}", b),
            FlatValue::Null => f.write_str("null"),
        }
    }
}

/// Flattens a JSON value into a path-keyed record.
///
/// Objects are descended into. Arrays are never expanded per element: a list
/// whose first element is a string becomes one joined value, every other list
/// is stored as a pretty-printed JSON blob.
pub fn flatten(value: &Value) -> FlatRecord {
    let mut out = FlatRecord::new();
    let mut path = Vec::new();
    flatten_into(value, &mut path, &mut out);
    out
}

fn flatten_into<'a>(value: &'a Value, path: &mut Vec<&'a str>, out: &mut FlatRecord) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(key);
                flatten_into(child, path, out);
                path.pop();
            }
        }
        Value::Array(items) => {
            out.insert(path.join(PATH_SEPARATOR), flatten_list(items));
        }
        Value::String(s) => {
            out.insert(path.join(PATH_SEPARATOR), FlatValue::Text(s.clone()));
        }
        Value::Number(n) => {
            out.insert(path.join(PATH_SEPARATOR), FlatValue::Number(n.clone()));
        }
        Value::Bool(b) => {
            out.insert(path.join(PATH_SEPARATOR), FlatValue::Bool(*b));
        }
        Value::Null => {
            out.insert(path.join(PATH_SEPARATOR), FlatValue::Null);
        }
    }
}

fn flatten_list(items: &[Value]) -> FlatValue {
    match items.first() {
        Some(Value::String(_)) => FlatValue::Joined(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        ),
        // Serializing an in-memory Value cannot fail; compact text is the fallback anyway.
        _ => FlatValue::Json(
            serde_json::to_string_pretty(items).unwrap_or_else(|_| Value::from(items.to_vec()).to_string()),
        ),
    }
}

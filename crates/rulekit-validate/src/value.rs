//! Helpers for reading attribute values out of a JSON record.

use serde_json::Value;

/// Stand-in for absent attributes.
pub(crate) static NULL: Value = Value::Null;

/// Look up an attribute in a record.
///
/// The exact key wins; otherwise the path is walked segment by segment through
/// nested objects, with numeric segments indexing into arrays.
pub fn lookup<'v>(data: &'v Value, path: &str) -> Option<&'v Value> {
    let object = data.as_object()?;
    if let Some(value) = object.get(path) {
        return Some(value);
    }
    if !path.contains('.') {
        return None;
    }

    let mut current = data;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Textual form of a value, as used for length and equality checks.
///
/// Integral numbers print without a fractional part, null prints empty and
/// containers print as JSON.
pub(crate) fn textual(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format_number(f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Numeric reading of a value: numbers, and strings that parse as finite numbers.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

//! Small type probes over `serde_json::Value`.

use serde_json::Value;

pub fn non_empty_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

pub fn is_non_negative_integer(v: Option<&Value>) -> bool {
    v.map_or(false, |v| v.is_u64())
}

pub fn is_finite_number(v: Option<&Value>) -> bool {
    v.and_then(Value::as_f64).map_or(false, f64::is_finite)
}

pub fn is_bool(v: Option<&Value>) -> bool {
    matches!(v, Some(Value::Bool(_)))
}

pub fn is_string_array(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Array(items)) => items.iter().all(Value::is_string),
        _ => false,
    }
}

/// Exact integer equality; `1.0` does not match `1`.
pub fn is_integer_eq(v: Option<&Value>, expected: u64) -> bool {
    v.and_then(Value::as_u64) == Some(expected)
}

pub fn describe(v: Option<&Value>) -> String {
    match v {
        None => "missing".to_string(),
        Some(v) => v.to_string(),
    }
}

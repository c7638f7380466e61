//! Key casing for JSON payloads.
//!
//! Gateway callers speak camelCase, the REST API speaks snake_case. Keys are
//! renamed recursively; values are never touched.

use serde_json::{Map, Value};

/// Recursively rename object keys from camelCase to snake_case.
pub fn to_snake_case_keys(value: Value) -> Value {
    rename_keys(value, snake_case)
}

/// Recursively rename object keys from snake_case to camelCase.
pub fn to_camel_case_keys(value: Value) -> Value {
    rename_keys(value, camel_case)
}

fn rename_keys(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (rename(&key), rename_keys(value, rename)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rename_keys(item, rename))
                .collect(),
        ),
        other => other,
    }
}

/// `dueDatetime` -> `due_datetime`
pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `due_datetime` -> `dueDatetime`
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch == '_' && !out.is_empty() {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    if upper_next {
        out.push('_');
    }
    out
}

//! Lenient parsing of free-text CLI values
//!
//! Each helper tries a strict structured parse first and falls back to the
//! literal text. The fallback path never fails.

use serde_json::Value;

use crate::error::{FmError, Result};

/// Parse a default value: JSON if it parses (`42`, `true`, `{"a":1}`),
/// otherwise the raw text as a JSON string.
pub fn parse_default_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Parse a variant list: a YAML sequence if it parses (`["a","b"]`, `[0, 1]`),
/// otherwise a comma-separated list with each element trimmed.
pub fn parse_variants(text: &str) -> Vec<String> {
    match serde_yaml::from_str::<Vec<serde_yaml::Value>>(text) {
        Ok(items) => items.into_iter().map(yaml_scalar_text).collect(),
        Err(_) => split_csv(text),
    }
}

/// Split a comma-separated string, trimming whitespace and discarding empty
/// segments.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

/// Parse a boolean switch given as text. `name` is the CLI flag, used in the
/// error message.
pub fn parse_bool(name: &str, text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Ok(true),
        "false" | "f" | "0" => Ok(false),
        _ => Err(FmError::validation(format!(
            "invalid {name} value '{text}', must be true or false"
        ))),
    }
}

fn yaml_scalar_text(value: serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

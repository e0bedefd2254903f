//! YAML and JSON data handling utilities.

use passcache_types::{PasscacheError, Result};
use serde_json::Value;
use std::path::Path;
use std::fs;

/// Load YAML from string.
pub fn load_yaml(content: &str) -> Result<Value> {
    serde_yaml::from_str(content)
        .map_err(PasscacheError::Yaml)
}

/// Load YAML from file.
pub fn load_yaml_file(path: impl AsRef<Path>) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    load_yaml(&content)
}

/// Deep merge two values.
/// Recursively merges objects, with overlay values taking precedence.
/// A null overlay (an empty YAML document) leaves the base untouched.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay_val) => overlay_val,
    }
}

/// Get value at a path in dotted notation.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                current = arr.get(index)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_overlay_wins() {
        let base = json!({"default_length": 20, "logs": [], "nested": {"a": 1, "b": 2}});
        let overlay = json!({"default_length": 32, "nested": {"b": 3}});
        let merged = deep_merge(base, overlay);
        assert_eq!(merged, json!({"default_length": 32, "logs": [], "nested": {"a": 1, "b": 3}}));
    }

    #[test]
    fn test_deep_merge_ignores_null_overlay() {
        let base = json!({"default_length": 20});
        assert_eq!(deep_merge(base.clone(), Value::Null), base);
    }

    #[test]
    fn test_get_path() {
        let value = json!({"logs": [{"level": "INFO"}]});
        assert_eq!(get_path(&value, "logs.0.level"), Some(&json!("INFO")));
        assert_eq!(get_path(&value, "logs.1.level"), None);
    }

    #[test]
    fn test_load_yaml_error_is_yaml_variant() {
        let err = load_yaml("key: [unterminated").unwrap_err();
        assert!(matches!(err, PasscacheError::Yaml(_)));
    }
}

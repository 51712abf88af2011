//! Merge primitives behind the per-key policies.
//!
//! `Replace` is destructive, `Append` is additive for lists and
//! `Merge` recurses into mappings. Which one applies is decided per
//! key by the profile, never globally.

use serde_json::Value;

use crate::core::errors::{Result, SiteconfError};
use crate::core::models::settings::{KeyPath, Settings, type_name};

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - A null overlay keeps the base value
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Replace the value at `path` wholesale.
pub fn replace(settings: &mut Settings, path: &KeyPath, value: Value) -> Result<()> {
    settings.set_path(path, value)
}

/// Append `items` to the list at `path`, keeping existing order.
///
/// Duplicates are kept. A missing key starts as an empty list.
pub fn append(settings: &mut Settings, path: &KeyPath, items: &[Value]) -> Result<()> {
    match settings.get_path_mut(path) {
        Some(Value::Array(list)) => {
            list.extend(items.iter().cloned());
            Ok(())
        }
        Some(other) => Err(SiteconfError::invalid_config(format!(
            "cannot append to {path}: it is {}, not a list",
            type_name(other)
        ))),
        None => settings.set_path(path, Value::Array(items.to_vec())),
    }
}

/// Deep-merge a mapping into the mapping at `path`.
pub fn merge(settings: &mut Settings, path: &KeyPath, overlay: &Value) -> Result<()> {
    match settings.get_path_mut(path) {
        Some(existing) if existing.is_object() => {
            let base = std::mem::take(existing);
            *existing = deep_merge(base, overlay.clone());
            Ok(())
        }
        Some(other) => Err(SiteconfError::invalid_config(format!(
            "cannot merge into {path}: it is {}, not a mapping",
            type_name(other)
        ))),
        None => settings.set_path(path, overlay.clone()),
    }
}

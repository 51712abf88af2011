use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::{Result, SiteconfError};
use crate::core::services::merge::deep_merge;

/// Placeholder written over secret values by [`Settings::redacted`].
pub const REDACTED: &str = "[REDACTED]";

/// Substrings that mark a settings key as holding a secret.
const SECRET_MARKERS: &[&str] = &["PASSWORD", "SECRET", "DSN", "TOKEN"];

/// Returns true if values under this key must not be printed.
pub fn is_secret_key(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|m| upper.contains(m))
}

/// Dotted path into nested settings, e.g. `LOGGING.handlers.console`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn parse(path: &str) -> Self {
        Self(path.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A settings mapping: string keys to strings, booleans, numbers,
/// lists or nested mappings.
///
/// Keys are kept sorted so two resolutions of the same inputs
/// serialize byte-for-byte identically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(SiteconfError::invalid_config(format!(
                "settings must be a mapping, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Set a top-level key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.get_path(&KeyPath::parse(path))
    }

    pub fn get_path(&self, path: &KeyPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        rest.iter()
            .try_fold(self.values.get(first)?, |node, segment| node.get(segment))
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// A list of strings; `None` if missing or any item is not a string.
    pub fn get_list(&self, path: &str) -> Option<Vec<&str>> {
        self.get(path)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// Mutable access to the value at `path`, if it exists.
    pub fn get_path_mut(&mut self, path: &KeyPath) -> Option<&mut Value> {
        let (first, rest) = path.segments().split_first()?;
        rest.iter().try_fold(self.values.get_mut(first)?, |node, segment| {
            node.get_mut(segment.as_str())
        })
    }

    /// Set the value at `path`, creating intermediate mappings.
    ///
    /// Fails if an intermediate node exists but is not a mapping.
    pub fn set_path(&mut self, path: &KeyPath, value: Value) -> Result<()> {
        let (last, parents) = path
            .segments()
            .split_last()
            .ok_or_else(|| SiteconfError::invalid_config("empty settings key"))?;

        let mut node = &mut self.values;
        for (depth, segment) in parents.iter().enumerate() {
            let child = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            node = child.as_object_mut().ok_or_else(|| {
                SiteconfError::invalid_config(format!(
                    "cannot set {path}: {} is not a mapping",
                    path.segments()[..=depth].join(".")
                ))
            })?;
        }
        node.insert(last.clone(), value);
        Ok(())
    }

    /// Deep-merge `overlay` into these settings. See [`deep_merge`].
    pub fn deep_merge(self, overlay: Settings) -> Settings {
        match deep_merge(Value::Object(self.values), Value::Object(overlay.values)) {
            Value::Object(values) => Settings { values },
            _ => unreachable!("merging two mappings yields a mapping"),
        }
    }

    /// Copy with every secret-looking value replaced by [`REDACTED`].
    pub fn redacted(&self) -> Settings {
        let mut values = self.values.clone();
        redact_map(&mut values);
        Settings { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.values)
            .map_err(|e| SiteconfError::invalid_config(format!("cannot render JSON: {e}")))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.values)
            .map_err(|e| SiteconfError::invalid_config(format!("cannot render TOML: {e}")))
    }
}

fn redact_map(map: &mut Map<String, Value>) {
    for (key, value) in map.iter_mut() {
        match value {
            Value::Null => {}
            Value::Object(child) => {
                if is_secret_key(key) {
                    *value = Value::String(REDACTED.to_string());
                } else {
                    redact_map(child);
                }
            }
            _ if is_secret_key(key) => *value = Value::String(REDACTED.to_string()),
            _ => {}
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

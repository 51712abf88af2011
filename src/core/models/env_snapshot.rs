use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::str::FromStr;

use crate::core::errors::{Result, SiteconfError};

const TRUE_STRINGS: &[&str] = &["true", "on", "ok", "y", "yes", "1"];
const FALSE_STRINGS: &[&str] = &["false", "off", "n", "no", "0", ""];

/// Immutable view of the environment used during one resolution.
///
/// Captured once from the process (or built from pairs in tests) and
/// never written back, so resolving is deterministic and isolated.
///
/// A variable whose value is not valid UTF-8 still counts as set: it is
/// never filled over, and reading it yields [`SiteconfError::InvalidValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
    non_utf8: BTreeSet<String>,
}

impl EnvSnapshot {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name is not valid UTF-8 cannot be looked up and
    /// are skipped.
    pub fn capture() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut snapshot = Self::default();
        for (key, value) in pairs {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    snapshot.vars.insert(key, value);
                }
                Err(_) => {
                    snapshot.non_utf8.insert(key);
                }
            }
        }
        snapshot
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            non_utf8: BTreeSet::new(),
        }
    }

    /// Add `pairs` for keys not already present. Returns the keys filled.
    pub fn fill_missing<I, K, V>(mut self, pairs: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut filled = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            if !self.contains(&key) {
                self.vars.insert(key.clone(), value.into());
                filled.push(key);
            }
        }
        (self, filled)
    }

    /// The value of `key`, if set and valid UTF-8.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a set value that is not UTF-8 is an error.
    pub fn value(&self, key: &str) -> Result<Option<&str>> {
        if self.non_utf8.contains(key) {
            return Err(SiteconfError::InvalidValue {
                key: key.to_string(),
                value: "<non-UTF-8 bytes>".to_string(),
                expected: "valid UTF-8 text",
            });
        }
        Ok(self.get(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key) || self.non_utf8.contains(key)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.value(key)?
            .ok_or_else(|| SiteconfError::MissingVariable {
                key: key.to_string(),
            })
    }

    pub fn str_or(&self, key: &str, default: &str) -> Result<String> {
        Ok(self.value(key)?.unwrap_or(default).to_string())
    }

    /// Parse a boolean, accepting the usual spellings (`yes`, `on`, `1`, ...).
    pub fn bool(&self, key: &str, default: bool) -> Result<bool> {
        let Some(raw) = self.value(key)? else {
            return Ok(default);
        };
        let lowered = raw.trim().to_ascii_lowercase();
        if TRUE_STRINGS.contains(&lowered.as_str()) {
            Ok(true)
        } else if FALSE_STRINGS.contains(&lowered.as_str()) {
            Ok(false)
        } else {
            Err(SiteconfError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                expected: "a boolean",
            })
        }
    }

    /// Comma-separated list; empty items are dropped.
    pub fn list(&self, key: &str, default: &[&str]) -> Result<Vec<String>> {
        Ok(match self.value(key)? {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            None => default.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn parse<T: FromStr>(&self, key: &str, default: T, expected: &'static str) -> Result<T> {
        match self.value(key)? {
            Some(raw) => raw.trim().parse().map_err(|_| SiteconfError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
                expected,
            }),
            None => Ok(default),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len() + self.non_utf8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

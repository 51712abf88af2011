use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single `KEY=value` entry in an environment file.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
    pub line_number: usize,
}

/// Represents any line in an environment file.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// A key-value variable entry.
    Entry(EnvEntry),
    /// A comment line (e.g. `# Database config`).
    Comment(String),
    /// An empty or whitespace-only line.
    Blank,
}

/// A parsed environment file (`.env`, `production.env`, ...).
///
/// Keeps comments and blank lines, so `lines[i]` is line `i + 1` of
/// the source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvFile {
    pub lines: Vec<Line>,
    pub source_path: Option<PathBuf>,
}

impl EnvFile {
    /// Returns the value for the given key, if present.
    ///
    /// When a key is repeated the last occurrence wins, matching how
    /// the file would behave if sourced by a shell.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .filter(|e| e.key == key)
            .last()
            .map(|e| e.value.as_str())
    }

    /// Returns all keys in this file, in file order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries().map(|e| e.key.as_str()).collect()
    }

    /// Iterates over only the key-value entries, skipping comments and blanks.
    pub fn entries(&self) -> impl Iterator<Item = &EnvEntry> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    /// Final value per key; a later duplicate replaces an earlier one.
    pub fn to_map(&self) -> BTreeMap<&str, &str> {
        self.entries()
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect()
    }

    /// Attach the path the file was read from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }
}

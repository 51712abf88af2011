use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use super::settings::KeyPath;

/// When a step runs relative to the others.
///
/// Literal overrides always land before derived values, whatever order
/// the profile declares them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Literal = 0,
    Derived = 1,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Literal => f.pad("literal"),
            Stage::Derived => f.pad("derived"),
        }
    }
}

/// How a step combines its value with whatever the key already holds.
#[derive(Debug, Clone, PartialEq)]
pub enum MergePolicy {
    /// Overwrite the key; nothing of the previous value survives.
    Replace(Value),
    /// Extend the list at the key, keeping the existing items first.
    Append(Vec<Value>),
    /// Deep-merge a mapping into the mapping at the key.
    Merge(Value),
    /// Compute the value from the environment and the settings so far.
    Compute(Derivation),
}

impl MergePolicy {
    pub fn stage(&self) -> Stage {
        match self {
            MergePolicy::Compute(_) => Stage::Derived,
            _ => Stage::Literal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MergePolicy::Replace(_) => "replace",
            MergePolicy::Append(_) => "append",
            MergePolicy::Merge(_) => "merge",
            MergePolicy::Compute(_) => "compute",
        }
    }
}

/// Size-bounded rotating log file handler.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFileSpec {
    /// Settings key holding the project root directory.
    pub root_key: String,
    /// Log file path relative to the root directory.
    pub relative_path: PathBuf,
    pub max_bytes: u64,
    pub backup_count: u32,
    pub level: String,
    pub formatter: String,
}

/// A value that needs runtime context to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Derivation {
    /// Read a secret that must be present in the environment.
    EnvSecret { var: String },
    /// Build a rotating file handler under the root directory and make
    /// sure its directory exists.
    RotatingLogFile(LogFileSpec),
    /// Error-reporting credentials tagged with the running release.
    ErrorReporting { dsn_var: String },
}

impl Derivation {
    /// Environment variables this derivation cannot run without.
    pub fn required_vars(&self) -> Vec<&str> {
        match self {
            Derivation::EnvSecret { var } => vec![var.as_str()],
            Derivation::ErrorReporting { dsn_var } => vec![dsn_var.as_str()],
            Derivation::RotatingLogFile(_) => vec![],
        }
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derivation::EnvSecret { var } => write!(f, "env ${var} (required)"),
            Derivation::RotatingLogFile(spec) => write!(
                f,
                "rotating file <{}>/{} ({} bytes x {} backups, {})",
                spec.root_key,
                spec.relative_path.display(),
                spec.max_bytes,
                spec.backup_count,
                spec.level
            ),
            Derivation::ErrorReporting { dsn_var } => {
                write!(f, "error reporting dsn=${dsn_var} release=<version>")
            }
        }
    }
}

/// One override applied to the settings: a key and its policy.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    pub key: KeyPath,
    pub policy: MergePolicy,
}

impl MergeStep {
    pub fn replace(key: &str, value: impl Into<Value>) -> Self {
        Self {
            key: KeyPath::parse(key),
            policy: MergePolicy::Replace(value.into()),
        }
    }

    pub fn append<I, V>(key: &str, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            key: KeyPath::parse(key),
            policy: MergePolicy::Append(items.into_iter().map(Into::into).collect()),
        }
    }

    pub fn merge(key: &str, value: Value) -> Self {
        Self {
            key: KeyPath::parse(key),
            policy: MergePolicy::Merge(value),
        }
    }

    pub fn compute(key: &str, derivation: Derivation) -> Self {
        Self {
            key: KeyPath::parse(key),
            policy: MergePolicy::Compute(derivation),
        }
    }

    pub fn stage(&self) -> Stage {
        self.policy.stage()
    }
}

impl fmt::Display for MergeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.policy.name();
        match &self.policy {
            MergePolicy::Replace(v) | MergePolicy::Merge(v) => {
                write!(f, "{name:<8} {} = {v}", self.key)
            }
            MergePolicy::Append(items) => {
                let rendered: Vec<String> = items.iter().map(Value::to_string).collect();
                write!(f, "{name:<8} {} += [{}]", self.key, rendered.join(", "))
            }
            MergePolicy::Compute(d) => write!(f, "{name:<8} {} <- {d}", self.key),
        }
    }
}

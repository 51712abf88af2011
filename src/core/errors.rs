use std::path::PathBuf;

/// All errors raised while resolving settings.
///
/// Every variant is fatal at startup: a half-configured process must
/// not begin serving, so callers propagate these rather than recover.
#[derive(Debug, thiserror::Error)]
pub enum SiteconfError {
    #[error(
        "Missing required environment variable: {key}\n\n  \
         Set it in the process environment or in the profile's env file.\n  \
         Run 'siteconf check' to list every missing variable."
    )]
    MissingVariable { key: String },

    #[error(
        "Parse error in {file} at line {line}: {detail}\n\n  \
         Expected format: KEY=value (one per line).\n  \
         Comments (#), blank lines and an 'export ' prefix are allowed."
    )]
    ParseError {
        file: PathBuf,
        line: usize,
        detail: String,
    },

    #[error("Invalid value for {key}: expected {expected}, got '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Profile '{name}' not found\n\n  \
         Available profiles: {available}"
    )]
    UnknownProfile { name: String, available: String },

    #[error(
        "Could not create log directory {path}: {source}\n\n  \
         Check permissions and free space, or point ROOT_DIR elsewhere."
    )]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SiteconfError {
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        SiteconfError::InvalidConfig {
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SiteconfError>;

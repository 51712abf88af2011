use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::core::errors::{Result, SiteconfError};
use crate::core::models::env_snapshot::EnvSnapshot;
use crate::core::models::settings::Settings;
use crate::core::traits::base_config::BaseConfig;

/// Base configuration that layers a TOML file over another base.
///
/// The inner base is built first; the file is then deep-merged over
/// it field by field. A missing file leaves the inner base untouched.
#[derive(Debug, Clone)]
pub struct TomlBase<B> {
    path: PathBuf,
    inner: B,
}

impl<B: BaseConfig> TomlBase<B> {
    pub fn new(path: impl Into<PathBuf>, inner: B) -> Self {
        Self {
            path: path.into(),
            inner,
        }
    }

    fn read_overlay(&self) -> Result<Option<Settings>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let value: Value = toml::from_str(&content).map_err(|e| {
            SiteconfError::invalid_config(format!(
                "Failed to parse {}: {e}",
                self.path.display()
            ))
        })?;
        Settings::from_value(value).map(Some)
    }
}

impl<B: BaseConfig> BaseConfig for TomlBase<B> {
    fn build(&self, env: &EnvSnapshot) -> Result<Settings> {
        let base = self.inner.build(env)?;
        match self.read_overlay()? {
            Some(overlay) => {
                debug!(path = %self.path.display(), keys = overlay.len(), "Merging base file");
                Ok(base.deep_merge(overlay))
            }
            None => Ok(base),
        }
    }
}

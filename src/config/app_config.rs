use std::path::PathBuf;

use crate::adapters::base::{DefaultBase, TomlBase};
use crate::adapters::parsers::dotenv_parser::DotenvParser;
use crate::config::constants::{BASE_FILE_NAME, DEFAULT_SETTINGS_DIR};
use crate::config::profiles;
use crate::core::errors::Result;
use crate::core::models::env_snapshot::EnvSnapshot;
use crate::core::models::profile::{ConfigurationProfile, Profile};
use crate::core::models::resolved::ResolvedSettings;
use crate::core::services::resolver::SettingsResolver;

/// Where a project keeps its settings files.
///
/// The settings directory holds the per-profile env files and the
/// optional `base.toml`:
///
/// ```text
/// settings/
///   .env             development
///   production.env
///   testing.env
///   base.toml        optional, merged over the built-in base
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings_dir: PathBuf,
    /// Base file override; defaults to `<settings_dir>/base.toml`.
    pub base_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SETTINGS_DIR)
    }
}

impl AppConfig {
    pub fn new(settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_dir: settings_dir.into(),
            base_file: None,
        }
    }

    pub fn with_base_file(mut self, path: Option<PathBuf>) -> Self {
        self.base_file = path;
        self
    }

    pub fn base_file(&self) -> PathBuf {
        self.base_file
            .clone()
            .unwrap_or_else(|| self.settings_dir.join(BASE_FILE_NAME))
    }

    pub fn env_file(&self, kind: Profile) -> PathBuf {
        self.settings_dir.join(profiles::env_file_name(kind))
    }

    pub fn profile(&self, kind: Profile) -> ConfigurationProfile {
        profiles::builtin(kind, &self.settings_dir)
    }

    /// The built-in base with `base.toml` merged over it.
    pub fn base(&self) -> TomlBase<DefaultBase> {
        TomlBase::new(self.base_file(), DefaultBase::new(&self.settings_dir))
    }

    pub fn resolver(&self) -> SettingsResolver<DotenvParser> {
        SettingsResolver::new(DotenvParser)
    }

    /// Resolve `kind` against an explicit environment snapshot.
    pub fn resolve_with(&self, kind: Profile, env: EnvSnapshot) -> Result<ResolvedSettings> {
        self.resolver()
            .resolve(&self.profile(kind), &self.base(), env)
    }

    /// Resolve `kind` against the current process environment.
    pub fn resolve(&self, kind: Profile) -> Result<ResolvedSettings> {
        self.resolve_with(kind, EnvSnapshot::capture())
    }
}

use std::path::PathBuf;

use super::env_snapshot::EnvSnapshot;
use super::profile::Profile;
use super::settings::Settings;

/// The frozen result of resolving one profile.
///
/// Only shared accessors are exposed: once built, every consumer
/// reads the same configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    profile: Profile,
    settings: Settings,
    env: EnvSnapshot,
    filled_from_file: Vec<String>,
    provisioned: Vec<PathBuf>,
}

impl ResolvedSettings {
    pub(crate) fn new(
        profile: Profile,
        settings: Settings,
        env: EnvSnapshot,
        filled_from_file: Vec<String>,
        provisioned: Vec<PathBuf>,
    ) -> Self {
        Self {
            profile,
            settings,
            env,
            filled_from_file,
            provisioned,
        }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The environment as the base configuration saw it.
    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    /// Keys the env file supplied because they were unset.
    pub fn filled_from_file(&self) -> &[String] {
        &self.filled_from_file
    }

    /// Directories this resolution had to create.
    pub fn provisioned(&self) -> &[PathBuf] {
        &self.provisioned
    }
}

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::errors::SiteconfError;

use super::merge_step::{MergePolicy, MergeStep};

/// A named deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Development,
    Production,
    Testing,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Development, Profile::Production, Profile::Testing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
            Profile::Testing => "testing",
        }
    }

    /// Default diagnostic log filter while this profile resolves.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Profile::Testing => "debug",
            _ => "info",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = SiteconfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "testing" | "test" => Ok(Profile::Testing),
            _ => Err(SiteconfError::UnknownProfile {
                name: s.to_string(),
                available: Profile::ALL
                    .iter()
                    .map(Profile::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

/// Everything one profile layers on top of the base configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationProfile {
    pub kind: Profile,
    /// Fallback environment file, read with fill-missing semantics.
    pub env_file: Option<PathBuf>,
    /// Filled after the env file, only for keys still unset.
    pub env_defaults: Vec<(String, String)>,
    steps: Vec<MergeStep>,
}

impl ConfigurationProfile {
    pub fn new(kind: Profile) -> Self {
        Self {
            kind,
            env_file: None,
            env_defaults: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_default(mut self, key: &str, value: &str) -> Self {
        self.env_defaults.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_step(mut self, step: MergeStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps in the order they will be applied.
    ///
    /// Sorting is stable: within a stage, declaration order is kept.
    pub fn plan(&self) -> Vec<&MergeStep> {
        let mut ordered: Vec<&MergeStep> = self.steps.iter().collect();
        ordered.sort_by_key(|step| step.stage());
        ordered
    }

    /// Environment variables the derived steps require.
    pub fn required_vars(&self) -> Vec<&str> {
        self.plan()
            .into_iter()
            .filter_map(|step| match &step.policy {
                MergePolicy::Compute(d) => Some(d.required_vars()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

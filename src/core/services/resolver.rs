use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::core::errors::Result;
use crate::core::models::env_snapshot::EnvSnapshot;
use crate::core::models::merge_step::MergePolicy;
use crate::core::models::profile::ConfigurationProfile;
use crate::core::models::resolved::ResolvedSettings;
use crate::core::models::settings::Settings;
use crate::core::services::{derive, merge, provision};
use crate::core::traits::base_config::BaseConfig;
use crate::core::traits::parser::EnvFileParser;

/// Release identifier embedded in derived values.
pub const RELEASE: &str = env!("CARGO_PKG_VERSION");

/// Environment after the profile's fill-missing layers.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimedEnv {
    pub env: EnvSnapshot,
    /// Keys supplied by the env file.
    pub filled_from_file: Vec<String>,
    /// Keys supplied by the profile's env defaults.
    pub filled_from_defaults: Vec<String>,
}

/// Resolves a profile into its frozen settings.
///
/// Layers apply in a fixed order, later layers winning:
/// env file and env defaults (fill-missing only), base configuration,
/// literal overrides, derived values. Directories the derived values
/// need are created last.
pub struct SettingsResolver<P> {
    parser: P,
    release: String,
}

impl<P: EnvFileParser> SettingsResolver<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            release: RELEASE.to_string(),
        }
    }

    /// Override the release embedded in error-reporting settings.
    pub fn with_release(mut self, release: impl Into<String>) -> Self {
        self.release = release.into();
        self
    }

    /// Phase one: fill the environment from the profile's env file and
    /// env defaults, never overriding what is already set.
    ///
    /// The file is read at most once. A missing file is not an error; a
    /// malformed one is.
    pub fn load_overrides(
        &self,
        profile: &ConfigurationProfile,
        env: EnvSnapshot,
    ) -> Result<PrimedEnv> {
        let (env, filled_from_file) = match &profile.env_file {
            Some(path) => match self.parser.load(path)? {
                Some(file) => {
                    let (env, filled) = env.fill_missing(file.to_map());
                    debug!(
                        path = %path.display(),
                        entries = file.keys().len(),
                        filled = filled.len(),
                        "Read env file"
                    );
                    (env, filled)
                }
                None => {
                    warn!(
                        path = %path.display(),
                        "Env file not found; relying on the process environment"
                    );
                    (env, Vec::new())
                }
            },
            None => (env, Vec::new()),
        };

        let (env, filled_from_defaults) = env.fill_missing(profile.env_defaults.iter().cloned());

        Ok(PrimedEnv {
            env,
            filled_from_file,
            filled_from_defaults,
        })
    }

    /// Required variables still unset after phase one, in plan order.
    pub fn missing_vars(
        &self,
        profile: &ConfigurationProfile,
        env: EnvSnapshot,
    ) -> Result<Vec<String>> {
        let primed = self.load_overrides(profile, env)?;
        Ok(profile
            .required_vars()
            .into_iter()
            .filter(|var| !primed.env.contains(var))
            .map(str::to_string)
            .collect())
    }

    /// Resolve `profile` on top of `base`.
    pub fn resolve<B>(
        &self,
        profile: &ConfigurationProfile,
        base: &B,
        env: EnvSnapshot,
    ) -> Result<ResolvedSettings>
    where
        B: BaseConfig + ?Sized,
    {
        debug!(profile = %profile.kind, "Settings loading");

        let primed = self.load_overrides(profile, env)?;
        let mut settings = base.build(&primed.env)?;
        let pending = self.apply_steps(profile, &mut settings, &primed.env)?;

        let mut provisioned = Vec::new();
        for dir in pending {
            if provision::ensure_dir(&dir)? {
                provisioned.push(dir);
            }
        }

        info!(profile = %profile.kind, keys = settings.len(), "Settings resolved");

        Ok(ResolvedSettings::new(
            profile.kind,
            settings,
            primed.env,
            primed.filled_from_file,
            provisioned,
        ))
    }

    /// Apply the profile's plan and return directories to provision.
    fn apply_steps(
        &self,
        profile: &ConfigurationProfile,
        settings: &mut Settings,
        env: &EnvSnapshot,
    ) -> Result<Vec<PathBuf>> {
        let mut pending = Vec::new();

        for step in profile.plan() {
            debug!(step = %step, "Applying");
            match &step.policy {
                MergePolicy::Replace(value) => merge::replace(settings, &step.key, value.clone())?,
                MergePolicy::Append(items) => merge::append(settings, &step.key, items)?,
                MergePolicy::Merge(value) => merge::merge(settings, &step.key, value)?,
                MergePolicy::Compute(derivation) => {
                    let derived = derive::evaluate(derivation, settings, env, &self.release)?;
                    settings.set_path(&step.key, derived.value)?;
                    pending.extend(derived.provision);
                }
            }
        }

        Ok(pending)
    }
}

use crate::core::errors::Result;
use crate::core::models::env_snapshot::EnvSnapshot;
use crate::core::models::settings::Settings;

/// The shared settings every profile extends.
///
/// The base receives the environment only after the profile's env file
/// and defaults have been filled in, so values it reads from the
/// environment can still be overridden by those files.
pub trait BaseConfig {
    fn build(&self, env: &EnvSnapshot) -> Result<Settings>;
}

/// A fixed mapping is a base that ignores the environment.
impl BaseConfig for Settings {
    fn build(&self, _env: &EnvSnapshot) -> Result<Settings> {
        Ok(self.clone())
    }
}

impl<F> BaseConfig for F
where
    F: Fn(&EnvSnapshot) -> Result<Settings>,
{
    fn build(&self, env: &EnvSnapshot) -> Result<Settings> {
        self(env)
    }
}

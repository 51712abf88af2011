//! The three built-in deployment profiles.
//!
//! Merge policy per key:
//! - `ALLOWED_HOSTS`: append (development adds local names to the base list)
//! - `EMAIL_BACKEND`, `LOGGING.handlers.*.{formatter,email_backend}`: replace
//! - `LOGGING.root.handlers`: append
//! - eager task flags: replace
//! - `LOGGING.handlers.file`, `EMAIL_HOST_PASSWORD`, `RAVEN_CONFIG`: compute

use std::path::{Path, PathBuf};

use crate::config::constants::*;
use crate::core::models::merge_step::{Derivation, LogFileSpec, MergeStep};
use crate::core::models::profile::{ConfigurationProfile, Profile};

/// Build the profile for `kind`, with env files under `settings_dir`.
pub fn builtin(kind: Profile, settings_dir: &Path) -> ConfigurationProfile {
    match kind {
        Profile::Development => development(settings_dir),
        Profile::Production => production(settings_dir),
        Profile::Testing => testing(settings_dir),
    }
}

pub fn env_file_name(kind: Profile) -> &'static str {
    match kind {
        Profile::Development => DEVELOPMENT_ENV_FILE,
        Profile::Production => PRODUCTION_ENV_FILE,
        Profile::Testing => TESTING_ENV_FILE,
    }
}

/// Local development: extra hostnames, console email, synchronous tasks.
pub fn development(settings_dir: &Path) -> ConfigurationProfile {
    ConfigurationProfile::new(Profile::Development)
        .with_env_file(settings_dir.join(DEVELOPMENT_ENV_FILE))
        .with_env_default(KEY_DEBUG, "True")
        .with_step(MergeStep::append(
            KEY_ALLOWED_HOSTS,
            ["127.0.0.1", "localhost", ".example.com", "vagrant"],
        ))
        .with_step(MergeStep::replace(KEY_EMAIL_BACKEND, EMAIL_BACKEND_CONSOLE))
        .with_step(MergeStep::replace(
            "LOGGING.handlers.mail_admins.email_backend",
            EMAIL_BACKEND_DUMMY,
        ))
        .with_step(MergeStep::replace(KEY_CELERY_ALWAYS_EAGER, true))
        .with_step(MergeStep::replace(KEY_CELERY_EAGER_PROPAGATES_EXCEPTIONS, true))
}

/// Production: verbose console, rotating log file, secrets from the
/// environment and error reporting tagged with the release.
pub fn production(settings_dir: &Path) -> ConfigurationProfile {
    ConfigurationProfile::new(Profile::Production)
        .with_env_file(settings_dir.join(PRODUCTION_ENV_FILE))
        .with_env_default(KEY_DEBUG, "False")
        .with_env_default(KEY_ASSETS_DEBUG, "False")
        .with_step(MergeStep::replace(
            "LOGGING.handlers.console.formatter",
            FORMATTER_VERBOSE,
        ))
        .with_step(MergeStep::append("LOGGING.root.handlers", [HANDLER_FILE]))
        .with_step(MergeStep::compute(
            "LOGGING.handlers.file",
            Derivation::RotatingLogFile(LogFileSpec {
                root_key: KEY_ROOT_DIR.to_string(),
                relative_path: PathBuf::from(LOG_FILE_RELATIVE_PATH),
                max_bytes: LOG_FILE_MAX_BYTES,
                backup_count: LOG_FILE_BACKUP_COUNT,
                level: "DEBUG".to_string(),
                formatter: FORMATTER_VERBOSE.to_string(),
            }),
        ))
        .with_step(MergeStep::compute(
            KEY_EMAIL_HOST_PASSWORD,
            Derivation::EnvSecret {
                var: KEY_EMAIL_HOST_PASSWORD.to_string(),
            },
        ))
        .with_step(MergeStep::compute(
            KEY_RAVEN_CONFIG,
            Derivation::ErrorReporting {
                dsn_var: ENV_RAVEN_CONFIG_DSN.to_string(),
            },
        ))
}

/// Tests: production-like, with every task queue running eagerly.
pub fn testing(settings_dir: &Path) -> ConfigurationProfile {
    ConfigurationProfile::new(Profile::Testing)
        .with_env_file(settings_dir.join(TESTING_ENV_FILE))
        .with_env_default(KEY_DEBUG, "False")
        .with_step(MergeStep::replace(KEY_CELERY_ALWAYS_EAGER, true))
        .with_step(MergeStep::replace(KEY_CELERY_EAGER_PROPAGATES_EXCEPTIONS, true))
        .with_step(MergeStep::replace(KEY_TASKER_ALWAYS_EAGER, true))
}

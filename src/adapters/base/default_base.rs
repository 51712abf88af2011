use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::config::constants::*;
use crate::core::errors::Result;
use crate::core::models::env_snapshot::EnvSnapshot;
use crate::core::models::settings::Settings;
use crate::core::traits::base_config::BaseConfig;

/// Built-in base configuration shared by every profile.
///
/// Reads its tunables from the environment it is given, so anything
/// set in the process or filled from the profile's env file shows up
/// here.
#[derive(Debug, Clone)]
pub struct DefaultBase {
    settings_dir: PathBuf,
}

impl DefaultBase {
    pub fn new(settings_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings_dir: settings_dir.into(),
        }
    }

    /// `ROOT_DIR` from the environment, else the settings directory's parent.
    fn root_dir(&self, env: &EnvSnapshot) -> Result<PathBuf> {
        let root = match env.value(KEY_ROOT_DIR)? {
            Some(dir) => PathBuf::from(dir),
            None => self
                .settings_dir
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        Ok(std::path::absolute(root)?)
    }
}

/// Logging tree consumed by [`crate::logging::LoggingConfig`].
fn logging_tree(root_level: &str) -> Value {
    json!({
        "version": 1,
        "formatters": {
            FORMATTER_VERBOSE: {"target": true, "thread_ids": true, "file_line": true},
            FORMATTER_SIMPLE: {"target": false, "thread_ids": false, "file_line": false}
        },
        "handlers": {
            HANDLER_CONSOLE: {
                "class": HANDLER_CLASS_CONSOLE,
                "level": "DEBUG",
                "formatter": FORMATTER_SIMPLE
            },
            HANDLER_MAIL_ADMINS: {
                "class": HANDLER_CLASS_MAIL_ADMINS,
                "level": "ERROR",
                "email_backend": EMAIL_BACKEND_SMTP
            }
        },
        "root": {
            "level": root_level,
            "handlers": [HANDLER_CONSOLE]
        }
    })
}

impl BaseConfig for DefaultBase {
    fn build(&self, env: &EnvSnapshot) -> Result<Settings> {
        let debug = env.bool(KEY_DEBUG, false)?;
        let mut settings = Settings::new();

        settings.insert(KEY_DEBUG, debug);
        settings.insert(KEY_ASSETS_DEBUG, env.bool(KEY_ASSETS_DEBUG, debug)?);
        settings.insert(
            KEY_ALLOWED_HOSTS,
            env.list(KEY_ALLOWED_HOSTS, &[DEFAULT_ALLOWED_HOST])?,
        );
        settings.insert(
            KEY_ROOT_DIR,
            self.root_dir(env)?.to_string_lossy().into_owned(),
        );

        settings.insert(KEY_EMAIL_BACKEND, EMAIL_BACKEND_SMTP);
        settings.insert(KEY_EMAIL_HOST, env.str_or(KEY_EMAIL_HOST, DEFAULT_EMAIL_HOST)?);
        settings.insert(
            KEY_EMAIL_PORT,
            env.parse(KEY_EMAIL_PORT, DEFAULT_EMAIL_PORT, "a port number")?,
        );
        settings.insert(KEY_EMAIL_HOST_USER, env.str_or(KEY_EMAIL_HOST_USER, "")?);
        settings.insert(KEY_EMAIL_HOST_PASSWORD, "");
        settings.insert(KEY_EMAIL_USE_TLS, env.bool(KEY_EMAIL_USE_TLS, false)?);
        settings.insert(
            KEY_DEFAULT_FROM_EMAIL,
            env.str_or(KEY_DEFAULT_FROM_EMAIL, DEFAULT_FROM_EMAIL)?,
        );

        let root_level = env.str_or(ENV_LOG_LEVEL, DEFAULT_LOG_LEVEL)?.to_ascii_uppercase();
        settings.insert(KEY_LOGGING, logging_tree(&root_level));

        settings.insert(KEY_CELERY_ALWAYS_EAGER, false);
        settings.insert(KEY_CELERY_EAGER_PROPAGATES_EXCEPTIONS, false);
        settings.insert(KEY_TASKER_ALWAYS_EAGER, false);

        Ok(settings)
    }
}

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::config::constants::HANDLER_CLASS_ROTATING_FILE;
use crate::core::errors::{Result, SiteconfError};
use crate::core::models::env_snapshot::EnvSnapshot;
use crate::core::models::merge_step::{Derivation, LogFileSpec};
use crate::core::models::settings::Settings;

/// Outcome of evaluating a [`Derivation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub value: Value,
    /// Directory that must exist before the value is usable.
    pub provision: Option<PathBuf>,
}

impl Derived {
    fn value(value: Value) -> Self {
        Self {
            value,
            provision: None,
        }
    }
}

/// Evaluate a derivation against the settings built so far.
pub fn evaluate(
    derivation: &Derivation,
    settings: &Settings,
    env: &EnvSnapshot,
    release: &str,
) -> Result<Derived> {
    match derivation {
        Derivation::EnvSecret { var } => Ok(Derived::value(Value::from(env.require(var)?))),
        Derivation::ErrorReporting { dsn_var } => Ok(Derived::value(json!({
            "dsn": env.require(dsn_var)?,
            "release": release,
        }))),
        Derivation::RotatingLogFile(spec) => rotating_log_file(spec, settings),
    }
}

fn rotating_log_file(spec: &LogFileSpec, settings: &Settings) -> Result<Derived> {
    let root = settings.get_str(&spec.root_key).ok_or_else(|| {
        SiteconfError::invalid_config(format!(
            "{} must be set to a directory before the log file can be placed",
            spec.root_key
        ))
    })?;
    let filename = Path::new(root).join(&spec.relative_path);

    Ok(Derived {
        value: json!({
            "class": HANDLER_CLASS_ROTATING_FILE,
            "formatter": spec.formatter,
            "backupCount": spec.backup_count,
            "maxBytes": spec.max_bytes,
            "level": spec.level,
            "filename": filename.to_string_lossy(),
        }),
        provision: filename.parent().map(Path::to_path_buf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> LogFileSpec {
        LogFileSpec {
            root_key: "ROOT_DIR".into(),
            relative_path: PathBuf::from("logs/website.log"),
            max_bytes: 4_194_304,
            backup_count: 3,
            level: "DEBUG".into(),
            formatter: "verbose".into(),
        }
    }

    #[test]
    fn env_secret_is_copied_exactly() {
        let env = EnvSnapshot::from_pairs([("EMAIL_HOST_PASSWORD", "secret123")]);
        let d = Derivation::EnvSecret {
            var: "EMAIL_HOST_PASSWORD".into(),
        };

        let derived = evaluate(&d, &Settings::new(), &env, "1.0.0").unwrap();

        assert_eq!(derived.value, json!("secret123"));
        assert_eq!(derived.provision, None);
    }

    #[test]
    fn env_secret_missing_fails() {
        let d = Derivation::EnvSecret {
            var: "EMAIL_HOST_PASSWORD".into(),
        };

        let err = evaluate(&d, &Settings::new(), &EnvSnapshot::default(), "1.0.0").unwrap_err();

        assert!(matches!(err, SiteconfError::MissingVariable { .. }));
    }

    #[test]
    fn error_reporting_embeds_release() {
        let env = EnvSnapshot::from_pairs([("RAVEN_CONFIG_DSN", "https://k@sentry.example.org/3")]);
        let d = Derivation::ErrorReporting {
            dsn_var: "RAVEN_CONFIG_DSN".into(),
        };

        let derived = evaluate(&d, &Settings::new(), &env, "2.4.1").unwrap();

        assert_eq!(
            derived.value,
            json!({"dsn": "https://k@sentry.example.org/3", "release": "2.4.1"})
        );
    }

    #[test]
    fn log_file_is_placed_under_root() {
        let mut settings = Settings::new();
        settings.insert("ROOT_DIR", "/srv/website");

        let derived = evaluate(
            &Derivation::RotatingLogFile(spec()),
            &settings,
            &EnvSnapshot::default(),
            "1.0.0",
        )
        .unwrap();

        assert_eq!(derived.value["filename"], json!("/srv/website/logs/website.log"));
        assert_eq!(derived.value["maxBytes"], json!(4_194_304));
        assert_eq!(derived.value["backupCount"], json!(3));
        assert_eq!(derived.provision, Some(PathBuf::from("/srv/website/logs")));
    }

    #[test]
    fn log_file_without_root_fails() {
        let err = evaluate(
            &Derivation::RotatingLogFile(spec()),
            &Settings::new(),
            &EnvSnapshot::default(),
            "1.0.0",
        )
        .unwrap_err();

        assert!(err.to_string().contains("ROOT_DIR"));
    }
}

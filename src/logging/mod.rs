//! Installs the resolved `LOGGING` tree as the process-wide tracing
//! subscriber.

pub mod rotating;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry, fmt};

use crate::config::constants::{
    FORMATTER_SIMPLE, HANDLER_CLASS_CONSOLE, HANDLER_CLASS_MAIL_ADMINS,
    HANDLER_CLASS_ROTATING_FILE, KEY_LOGGING,
};
use crate::core::errors::{Result, SiteconfError};
use crate::core::models::settings::Settings;
use rotating::RotatingFileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Typed view of the `LOGGING` settings tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub formatters: BTreeMap<String, FormatterConfig>,
    #[serde(default)]
    pub handlers: BTreeMap<String, HandlerConfig>,
    #[serde(default)]
    pub root: RootConfig,
    /// Ceiling applied to console handlers on top of their own level.
    #[serde(skip)]
    pub console_cap: Option<LevelFilter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatterConfig {
    #[serde(default)]
    pub target: bool,
    #[serde(default)]
    pub thread_ids: bool,
    #[serde(default)]
    pub file_line: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    pub class: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub formatter: Option<String>,
    #[serde(default)]
    pub filename: Option<PathBuf>,
    #[serde(default, rename = "maxBytes")]
    pub max_bytes: Option<u64>,
    #[serde(default, rename = "backupCount")]
    pub backup_count: Option<u32>,
    #[serde(default)]
    pub email_backend: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootConfig {
    #[serde(default = "default_root_level")]
    pub level: String,
    #[serde(default)]
    pub handlers: Vec<String>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            level: default_root_level(),
            handlers: Vec::new(),
        }
    }
}

fn default_root_level() -> String {
    "INFO".to_string()
}

impl LoggingConfig {
    /// Read `LOGGING` from resolved settings. An absent tree yields an
    /// empty config that installs no handlers.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match settings.get(KEY_LOGGING) {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                SiteconfError::invalid_config(format!("{KEY_LOGGING} is malformed: {e}"))
            }),
            None => Ok(Self::default()),
        }
    }

    /// Handlers attached to the root logger, in declaration order.
    pub fn root_handlers(&self) -> Result<Vec<(&str, &HandlerConfig)>> {
        self.root
            .handlers
            .iter()
            .map(|name| {
                self.handlers
                    .get(name)
                    .map(|handler| (name.as_str(), handler))
                    .ok_or_else(|| {
                        SiteconfError::invalid_config(format!(
                            "root logger references undefined handler '{name}'"
                        ))
                    })
            })
            .collect()
    }

    /// Let console handlers emit nothing more verbose than `cap`.
    pub fn with_console_cap(mut self, cap: LevelFilter) -> Self {
        self.console_cap = Some(cap);
        self
    }

    fn formatter(&self, name: Option<&str>) -> FormatterConfig {
        self.formatters
            .get(name.unwrap_or(FORMATTER_SIMPLE))
            .cloned()
            .unwrap_or_default()
    }

    /// One tracing layer per wired root handler.
    pub(crate) fn layers(&self) -> Result<Vec<BoxedLayer>> {
        let root_level = parse_level(&self.root.level)?;
        let mut layers = Vec::new();

        for (name, handler) in self.root_handlers()? {
            let level = match &handler.level {
                Some(level) => parse_level(level)?.min(root_level),
                None => root_level,
            };
            let format = self.formatter(handler.formatter.as_deref());

            match handler.class.as_str() {
                HANDLER_CLASS_CONSOLE => layers.push(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(format.target)
                        .with_thread_ids(format.thread_ids)
                        .with_file(format.file_line)
                        .with_line_number(format.file_line)
                        .with_filter(self.console_cap.map_or(level, |cap| level.min(cap)))
                        .boxed(),
                ),
                HANDLER_CLASS_ROTATING_FILE => {
                    let path = handler.filename.as_ref().ok_or_else(|| {
                        SiteconfError::invalid_config(format!("handler '{name}' has no filename"))
                    })?;
                    let writer = RotatingFileWriter::open(
                        path,
                        handler.max_bytes.unwrap_or(0),
                        handler.backup_count.unwrap_or(0),
                    )?;
                    layers.push(
                        fmt::layer()
                            .with_writer(Mutex::new(writer))
                            .with_ansi(false)
                            .with_target(format.target)
                            .with_thread_ids(format.thread_ids)
                            .with_file(format.file_line)
                            .with_line_number(format.file_line)
                            .with_filter(level)
                            .boxed(),
                    );
                }
                HANDLER_CLASS_MAIL_ADMINS => {
                    debug!(
                        handler = name,
                        backend = handler.email_backend.as_deref().unwrap_or("unset"),
                        "Admin mail handler is not wired to a transport"
                    );
                }
                other => {
                    return Err(SiteconfError::invalid_config(format!(
                        "handler '{name}' has unknown class '{other}'"
                    )));
                }
            }
        }

        Ok(layers)
    }
}

/// Map a logging level name onto a tracing filter.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.to_ascii_uppercase().as_str() {
        "NOTSET" | "TRACE" => Ok(LevelFilter::TRACE),
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" | "WARNING" => Ok(LevelFilter::WARN),
        "ERROR" | "CRITICAL" => Ok(LevelFilter::ERROR),
        "OFF" => Ok(LevelFilter::OFF),
        _ => Err(SiteconfError::InvalidValue {
            key: "LOGGING level".to_string(),
            value: level.to_string(),
            expected: "a log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)",
        }),
    }
}

/// Install `config` as the global subscriber.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let layers = config.layers()?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| SiteconfError::invalid_config(format!("logging already initialized: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn logging_settings(handlers: serde_json::Value, root: serde_json::Value) -> Settings {
        Settings::from_value(json!({
            "LOGGING": {
                "version": 1,
                "formatters": {
                    "verbose": {"target": true, "thread_ids": true, "file_line": true},
                    "simple": {"target": false, "thread_ids": false, "file_line": false}
                },
                "handlers": handlers,
                "root": root
            }
        }))
        .unwrap()
    }

    #[test]
    fn reads_rotating_handler_fields() {
        let settings = logging_settings(
            json!({"file": {
                "class": "rotating_file",
                "level": "DEBUG",
                "formatter": "verbose",
                "filename": "/srv/site/logs/website.log",
                "maxBytes": 4194304,
                "backupCount": 3
            }}),
            json!({"level": "INFO", "handlers": ["file"]}),
        );

        let config = LoggingConfig::from_settings(&settings).unwrap();
        let file = &config.handlers["file"];

        assert_eq!(config.version, Some(1));
        assert_eq!(file.max_bytes, Some(4 * 1024 * 1024));
        assert_eq!(file.backup_count, Some(3));
        assert_eq!(file.filename, Some(PathBuf::from("/srv/site/logs/website.log")));
        assert!(config.formatter(file.formatter.as_deref()).file_line);
    }

    #[test]
    fn missing_tree_is_empty() {
        let config = LoggingConfig::from_settings(&Settings::new()).unwrap();

        assert!(config.handlers.is_empty());
        assert!(config.layers().unwrap().is_empty());
    }

    #[test]
    fn undefined_root_handler_is_rejected() {
        let settings = logging_settings(json!({}), json!({"handlers": ["file"]}));
        let config = LoggingConfig::from_settings(&settings).unwrap();

        let err = config.root_handlers().unwrap_err();

        assert!(err.to_string().contains("undefined handler 'file'"));
    }

    #[test]
    fn mail_admins_installs_no_layer() {
        let settings = logging_settings(
            json!({
                "console": {"class": "console", "level": "DEBUG", "formatter": "simple"},
                "mail_admins": {"class": "mail_admins", "level": "ERROR", "email_backend": "smtp"}
            }),
            json!({"level": "INFO", "handlers": ["console", "mail_admins"]}),
        );
        let config = LoggingConfig::from_settings(&settings).unwrap();

        assert_eq!(config.layers().unwrap().len(), 1);
    }

    #[test]
    fn unknown_class_is_rejected() {
        let settings = logging_settings(
            json!({"syslog": {"class": "syslog"}}),
            json!({"handlers": ["syslog"]}),
        );
        let config = LoggingConfig::from_settings(&settings).unwrap();

        assert!(config.layers().is_err());
    }

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level("WARNING").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("critical").unwrap(), LevelFilter::ERROR);
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert!(parse_level("LOUD").is_err());
    }

    #[test]
    fn file_layer_writes_events_at_root_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("website.log");
        let settings = logging_settings(
            json!({"file": {
                "class": "rotating_file",
                "level": "DEBUG",
                "formatter": "verbose",
                "filename": path,
                "maxBytes": 4096,
                "backupCount": 1
            }}),
            json!({"level": "INFO", "handlers": ["file"]}),
        );
        let config = LoggingConfig::from_settings(&settings).unwrap();
        let subscriber = tracing_subscriber::registry().with(config.layers().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("below root level");
            tracing::info!(profile = "production", "Startup complete");
        });

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Startup complete"));
        assert!(written.contains("profile=\"production\""));
        assert!(!written.contains("below root level"));
    }
}

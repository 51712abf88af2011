//! Settings keys, identifiers and defaults.
//!
//! Centralized so profiles, the base configuration and the logging
//! layer agree on names.

// =============================================================================
// Settings keys
// =============================================================================

pub const KEY_DEBUG: &str = "DEBUG";
pub const KEY_ASSETS_DEBUG: &str = "ASSETS_DEBUG";
pub const KEY_ALLOWED_HOSTS: &str = "ALLOWED_HOSTS";
pub const KEY_ROOT_DIR: &str = "ROOT_DIR";
pub const KEY_EMAIL_BACKEND: &str = "EMAIL_BACKEND";
pub const KEY_EMAIL_HOST: &str = "EMAIL_HOST";
pub const KEY_EMAIL_PORT: &str = "EMAIL_PORT";
pub const KEY_EMAIL_HOST_USER: &str = "EMAIL_HOST_USER";
pub const KEY_EMAIL_HOST_PASSWORD: &str = "EMAIL_HOST_PASSWORD";
pub const KEY_EMAIL_USE_TLS: &str = "EMAIL_USE_TLS";
pub const KEY_DEFAULT_FROM_EMAIL: &str = "DEFAULT_FROM_EMAIL";
pub const KEY_LOGGING: &str = "LOGGING";
pub const KEY_CELERY_ALWAYS_EAGER: &str = "CELERY_ALWAYS_EAGER";
pub const KEY_CELERY_EAGER_PROPAGATES_EXCEPTIONS: &str = "CELERY_EAGER_PROPAGATES_EXCEPTIONS";
pub const KEY_TASKER_ALWAYS_EAGER: &str = "TASKER_ALWAYS_EAGER";
pub const KEY_RAVEN_CONFIG: &str = "RAVEN_CONFIG";

// =============================================================================
// Environment variables
// =============================================================================

/// Root level of the base logging tree.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Error-reporting endpoint, required in production.
pub const ENV_RAVEN_CONFIG_DSN: &str = "RAVEN_CONFIG_DSN";

/// Profile selection for the CLI.
pub const ENV_PROFILE: &str = "SITECONF_PROFILE";

/// Settings directory override for the CLI.
pub const ENV_SETTINGS_DIR: &str = "SITECONF_SETTINGS_DIR";

// =============================================================================
// Email backends
// =============================================================================

/// Real outbound delivery.
pub const EMAIL_BACKEND_SMTP: &str = "smtp";

/// Writes messages to stdout instead of sending them.
pub const EMAIL_BACKEND_CONSOLE: &str = "console";

/// Drops messages silently.
pub const EMAIL_BACKEND_DUMMY: &str = "dummy";

// =============================================================================
// Logging
// =============================================================================

pub const HANDLER_CONSOLE: &str = "console";
pub const HANDLER_FILE: &str = "file";
pub const HANDLER_MAIL_ADMINS: &str = "mail_admins";

pub const HANDLER_CLASS_CONSOLE: &str = "console";
pub const HANDLER_CLASS_ROTATING_FILE: &str = "rotating_file";
pub const HANDLER_CLASS_MAIL_ADMINS: &str = "mail_admins";

pub const FORMATTER_VERBOSE: &str = "verbose";
pub const FORMATTER_SIMPLE: &str = "simple";

/// Production log file, relative to the root directory.
pub const LOG_FILE_RELATIVE_PATH: &str = "logs/website.log";

/// 4 MiB per log file before rotating.
pub const LOG_FILE_MAX_BYTES: u64 = 4 * 1024 * 1024;

/// Rotated files kept next to the active one.
pub const LOG_FILE_BACKUP_COUNT: u32 = 3;

// =============================================================================
// Files
// =============================================================================

/// Default settings directory, relative to the working directory.
pub const DEFAULT_SETTINGS_DIR: &str = "settings";

/// Optional base overrides inside the settings directory.
pub const BASE_FILE_NAME: &str = "base.toml";

pub const DEVELOPMENT_ENV_FILE: &str = ".env";
pub const PRODUCTION_ENV_FILE: &str = "production.env";
pub const TESTING_ENV_FILE: &str = "testing.env";

// =============================================================================
// Base defaults
// =============================================================================

pub const DEFAULT_ALLOWED_HOST: &str = "example.org";
pub const DEFAULT_EMAIL_HOST: &str = "localhost";
pub const DEFAULT_EMAIL_PORT: u16 = 25;
pub const DEFAULT_FROM_EMAIL: &str = "webmaster@localhost";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

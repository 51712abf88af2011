use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::app_config::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global settings location from the command line.
pub fn init(settings_dir: PathBuf, base_file: Option<PathBuf>) {
    let _ = APP_CONFIG.set(AppConfig::new(settings_dir).with_base_file(base_file));
}

/// Get the current settings location, falling back to `settings/`.
pub fn app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::default)
}

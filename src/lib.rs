//! Layered site settings for development, production and testing.
//!
//! A profile fills the environment from its env file, builds the shared
//! base configuration from that environment, then applies its ordered
//! merge steps: literal overrides first, derived values second.
//!
//! ```no_run
//! use siteconf::config::app_config::AppConfig;
//! use siteconf::core::models::profile::Profile;
//!
//! let resolved = AppConfig::new("settings").resolve(Profile::Production)?;
//! println!("{}", resolved.settings().redacted().to_json_pretty()?);
//! # Ok::<(), siteconf::core::errors::SiteconfError>(())
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::app_config::AppConfig;
pub use crate::core::errors::{Result, SiteconfError};
pub use crate::core::models::profile::{ConfigurationProfile, Profile};
pub use crate::core::models::resolved::ResolvedSettings;
pub use crate::core::models::settings::Settings;

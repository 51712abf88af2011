pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{DEFAULT_SETTINGS_DIR, ENV_PROFILE, ENV_SETTINGS_DIR};
use crate::core::models::profile::Profile;

/// Resolve layered site settings for development, production and testing.
#[derive(Parser, Debug)]
#[command(name = "siteconf", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Deployment profile (development, production, testing)
    #[arg(long, global = true, env = ENV_PROFILE, default_value = "development")]
    pub profile: Profile,

    /// Directory holding the env files and base.toml
    #[arg(long, global = true, env = ENV_SETTINGS_DIR, default_value = DEFAULT_SETTINGS_DIR)]
    pub settings_dir: PathBuf,

    /// Base settings file (default: <settings-dir>/base.toml)
    #[arg(long, global = true)]
    pub base: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the profile and print its settings
    Resolve {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Print passwords, secrets and DSNs in clear
        #[arg(long)]
        show_secrets: bool,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the profile's merge steps in application order
    Plan,

    /// Report required environment variables that are still unset
    Check,

    /// List the built-in profiles
    Profiles,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

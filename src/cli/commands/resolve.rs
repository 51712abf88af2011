use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, info};

use crate::cli::Format;
use crate::cli::context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::profile::Profile;
use crate::logging::{self, LoggingConfig};

/// Execute the `siteconf resolve` command.
///
/// Resolution runs under the bootstrap subscriber. Once it succeeds the
/// resolved `LOGGING` tree becomes the global subscriber and the startup
/// line is emitted through it, so a failed resolution never logs one.
pub fn execute(
    kind: Profile,
    format: Format,
    show_secrets: bool,
    output_path: Option<&Path>,
    quiet: bool,
    bootstrap: &Dispatch,
) -> Result<()> {
    let config = context::app_config();
    let resolved = tracing::dispatcher::with_default(bootstrap, || config.resolve(kind))?;

    let mut logging_config = LoggingConfig::from_settings(resolved.settings())?;
    if quiet {
        logging_config = logging_config.with_console_cap(LevelFilter::ERROR);
    }
    logging::init(&logging_config)?;
    info!(
        profile = %resolved.profile(),
        provisioned = resolved.provisioned().len(),
        "Startup complete"
    );

    let settings = if show_secrets {
        resolved.settings().clone()
    } else {
        resolved.settings().redacted()
    };
    let rendered = match format {
        Format::Json => settings.to_json_pretty()?,
        Format::Toml => settings.to_toml()?,
    };

    match output_path {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))?;
            output::success(&format!(
                "Resolved {} settings for {kind}, written to {}",
                settings.len(),
                path.display()
            ));
            if !resolved.filled_from_file().is_empty() {
                output::success(&format!(
                    "{} variable(s) taken from {}",
                    resolved.filled_from_file().len(),
                    config.env_file(kind).display()
                ));
            }
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

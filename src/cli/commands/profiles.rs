use colored::Colorize;

use crate::cli::context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::profile::Profile;

/// Execute the `siteconf profiles` command.
pub fn execute(selected: Profile) -> Result<()> {
    let config = context::app_config();

    output::header("Profiles");

    for kind in Profile::ALL {
        let profile = config.profile(kind);
        let env_file = config.env_file(kind);
        let marker = if kind == selected { "*" } else { " " };
        let status = if env_file.is_file() {
            "found".green()
        } else {
            "missing".yellow()
        };
        let required = profile.required_vars();
        let required = if required.is_empty() {
            "none".to_string()
        } else {
            required.join(", ")
        };

        println!(
            "  {marker} {:<12} {} ({status}), {} step(s), requires: {required}",
            kind.as_str(),
            env_file.display(),
            profile.plan().len()
        );
    }

    Ok(())
}

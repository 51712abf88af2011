use crate::cli::context;
use crate::cli::output;
use crate::core::errors::{Result, SiteconfError};
use crate::core::models::env_snapshot::EnvSnapshot;
use crate::core::models::profile::Profile;

/// Execute the `siteconf check` command.
///
/// Fills the environment from the profile's env file and defaults, then
/// reports every required variable still unset. Fails if any are.
pub fn execute(kind: Profile) -> Result<()> {
    let config = context::app_config();
    let profile = config.profile(kind);
    let required = profile.required_vars();
    let missing = config
        .resolver()
        .missing_vars(&profile, EnvSnapshot::capture())?;

    output::header(&format!("siteconf check: {kind}"));

    if required.is_empty() {
        output::success("No required variables");
        return Ok(());
    }

    let present = required.len() - missing.len();
    if missing.is_empty() {
        output::success(&format!(
            "{present}/{} required variables set",
            required.len()
        ));
        return Ok(());
    }

    output::warning(&format!("Missing variables ({}):", missing.len()));
    for key in &missing {
        output::item(key);
    }
    println!();
    output::success(&format!(
        "{present}/{} required variables set",
        required.len()
    ));

    Err(SiteconfError::MissingVariable {
        key: missing.join(", "),
    })
}

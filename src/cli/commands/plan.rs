use crate::cli::context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::profile::Profile;

/// Execute the `siteconf plan` command.
pub fn execute(kind: Profile) -> Result<()> {
    let config = context::app_config();
    let profile = config.profile(kind);

    output::header(&format!("Merge plan: {kind}"));
    println!("  env file: {}", config.env_file(kind).display());
    for (key, value) in &profile.env_defaults {
        println!("  default:  {key}={value}");
    }
    println!();

    for (i, step) in profile.plan().iter().enumerate() {
        println!("  {:>2}. [{:<7}] {step}", i + 1, step.stage());
    }

    let required = profile.required_vars();
    if !required.is_empty() {
        println!();
        output::warning(&format!("Requires: {}", required.join(", ")));
    }

    Ok(())
}

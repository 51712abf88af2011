use clap::Parser;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

use siteconf::cli::{self, Cli, Commands};

/// Diagnostics subscriber active while settings resolve, before the
/// resolved `LOGGING` tree can be installed.
fn bootstrap_dispatch(args: &Cli) -> Dispatch {
    let filter = if args.quiet {
        EnvFilter::new("error")
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(args.profile.default_log_filter()))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    Dispatch::new(subscriber)
}

fn main() {
    let args = Cli::parse();

    cli::context::init(args.settings_dir.clone(), args.base.clone());
    let bootstrap = bootstrap_dispatch(&args);

    let result = match &args.command {
        Commands::Resolve {
            format,
            show_secrets,
            output,
        } => cli::commands::resolve::execute(
            args.profile,
            *format,
            *show_secrets,
            output.as_deref(),
            args.quiet,
            &bootstrap,
        ),
        Commands::Plan => cli::commands::plan::execute(args.profile),
        Commands::Check => tracing::dispatcher::with_default(&bootstrap, || {
            cli::commands::check::execute(args.profile)
        }),
        Commands::Profiles => cli::commands::profiles::execute(args.profile),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

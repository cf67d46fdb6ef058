//! claimguard CLI - check grievance claim transitions against the workflow rules

use clap::Parser;
use claimguard::cli::{commands, Cli, Commands};
use claimguard::config::build_guard;
use claimguard::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit code for a well-formed context whose transition was rejected
const EXIT_REJECTED: i32 = 2;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(EXIT_REJECTED),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

/// Returns `false` only when a validated transition was rejected
fn run(cli: Cli) -> claimguard::Result<bool> {
    let guard = build_guard(cli.policy.as_deref())?;

    match cli.command {
        Commands::Validate { context, now } => commands::validate::run(&guard, &context, now),
        Commands::Allowed { state, role, json } => {
            commands::allowed::run(&guard, state, role, json).map(|()| true)
        }
        Commands::Requirements { from, to, json } => {
            commands::requirements::run(&guard, from, to, json).map(|()| true)
        }
        Commands::Graph { json } => commands::graph::run(&guard, json).map(|()| true),
        Commands::Policy => commands::policy::run(&guard).map(|()| true),
    }
}

mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose);
    cli::context::init(args.home.as_deref());

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(),
        Commands::Recipient { action } => cli::commands::recipient::execute(action),
        Commands::Issuer { action } => cli::commands::issuer::execute(action),
        Commands::Issue {
            cert,
            signature,
            signature_file,
        } => cli::commands::issue::execute(cert, signature.as_deref(), signature_file.as_deref()),
        Commands::Certs { query } => cli::commands::certs::execute(query),
        Commands::Log {
            operator,
            action,
            subject,
            since,
            last,
        } => cli::commands::log::execute(
            operator.as_deref(),
            action.as_deref(),
            subject.as_deref(),
            since.as_deref(),
            *last,
        ),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `CERTCHAIN_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "certchain=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CERTCHAIN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

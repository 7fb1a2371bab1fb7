//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Environment first, flags on top
    let config = Config::from_env().with_timeout(cli.timeout);

    let ctx = commands::Context::new(config, cli.verbose);

    match cli.command {
        Commands::Scan(args) => commands::scan::execute(ctx, args).await,
        Commands::Update => commands::update::execute(ctx).await,
        Commands::Web(args) => commands::web::execute(ctx, args).await,
    }
}

/// Log to stderr so JSON on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

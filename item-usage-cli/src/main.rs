mod api;
mod cli;
mod config;
mod error;
mod report;
mod services;

use clap::Parser;
use colored::*;
use is_terminal::IsTerminal;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads ITEM_USAGE_* variables
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    init_logging(cli.global.verbose);

    if cli.global.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = cli::run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if e
            .downcast_ref::<error::UsageError>()
            .is_some_and(error::UsageError::is_transport)
        {
            eprintln!(
                "{}",
                "Check the network connection, the project ID and the preview key.".dimmed()
            );
        }
        std::process::exit(1);
    }
}

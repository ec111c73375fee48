//! Entry point for diffview, a terminal renderer for unified diffs.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! sets up logging, and dispatches to the appropriate subcommand handler.

mod cli;
mod config;
mod constants;
mod diff;
mod input;
mod output;
mod render;
mod tui;

use anyhow::Result;

/// Runs the diffview CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`]. Logs go to stderr so rendered diffs on
/// stdout stay clean.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run(cli).await
}

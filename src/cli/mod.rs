//! Command-line interface definition and dispatch for diffview.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand is
//! routed to its handler; the diff-producing commands live in the
//! [`commands`] submodule.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::config;

/// Top-level CLI structure for diffview.
///
/// Parsed from command-line arguments via [`clap::Parser`]. Contains a single
/// required subcommand that determines which action diffview performs.
#[derive(Parser)]
#[command(name = "diffview", about = "Render unified diffs in the terminal")]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the diffview CLI.
///
/// Each variant maps to a top-level action. The `///` doc comments on variants
/// double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Render a unified diff from a file or stdin
    Show {
        /// Diff file to read (`-` or omitted for stdin)
        input: Option<PathBuf>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Diff two files and render the result
    Compare {
        /// Original file (may be missing, which renders a new file)
        old: PathBuf,
        /// Modified file
        new: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print the parsed diff records as JSON
    Parse {
        /// Diff file to read (`-` or omitted for stdin)
        input: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Presentation flags shared by `show` and `compare`. Flags beat config.
#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// File name used for syntax detection (defaults to the `+++` header)
    #[arg(short, long)]
    pub filename: Option<String>,
    /// Render width in columns (defaults to the terminal width)
    #[arg(short, long)]
    pub width: Option<usize>,
    /// Maximum rows to print
    #[arg(long)]
    pub height: Option<usize>,
    /// Spaces per tab
    #[arg(long)]
    pub tab_width: Option<usize>,
    /// Plain "<kind>: <text>" output for screen readers
    #[arg(long)]
    pub screen_reader: bool,
    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
    /// Open the scrollable terminal UI
    #[arg(long)]
    pub tui: bool,
}

/// Subcommands for the `config` command.
///
/// Inspects diffview's TOML configuration file stored at the XDG config
/// path (`~/.config/diffview/config.toml`).
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective config
    Show,
    /// Print the config file path
    Path,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show { input, view } => {
            let config = config::Config::load()?;
            commands::show(input.as_deref(), &view, &config).await
        }
        Commands::Compare { old, new, view } => {
            let config = config::Config::load()?;
            commands::compare(&old, &new, &view, &config).await
        }
        Commands::Parse { input } => commands::parse(input.as_deref()),
        Commands::Config { action } => {
            let path = config::Config::config_path()?;
            match action {
                ConfigAction::Show => {
                    let config = config::Config::load()?;
                    println!("{} {}", "Config path:".bold(), path.display());
                    println!();
                    let toml_str = toml::to_string_pretty(&config)?;
                    println!("{}", toml_str);
                }
                ConfigAction::Path => println!("{}", path.display()),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_flags_parse() {
        let cli = Cli::parse_from([
            "diffview",
            "show",
            "change.diff",
            "--width",
            "60",
            "--tab-width",
            "2",
            "--screen-reader",
        ]);
        let Commands::Show { input, view } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(input, Some(PathBuf::from("change.diff")));
        assert_eq!(view.width, Some(60));
        assert_eq!(view.tab_width, Some(2));
        assert!(view.screen_reader);
        assert!(!view.tui);
    }
}

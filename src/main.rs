//! Refile CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Preview a rename
//! refile rename *.JPG -m 'case:lower:all' --dry-run
//!
//! # Number a set of photos, skipping the prompt
//! refile rename *.jpg -m 'template:holiday_{n:1:3}' -y
//!
//! # Save and reuse a pipeline
//! refile preset save tidy -m 'replace: :_' -m 'case:lower'
//! refile rename ~/Downloads/* --preset tidy
//!
//! # Machine-readable result
//! refile -q rename a.txt -m 'add:old_' -y --json
//! ```
//!
//! Set `RUST_LOG=refile=debug` for per-file progress.
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/refile/config.toml` on Linux) and created with defaults on
//! first run.

use std::process::ExitCode;

use colored::Colorize;
use refile::cli::{Cli, Commands};
use refile::config::RefileConfig;
use refile::{RefileError, commands};

fn run() -> Result<ExitCode, RefileError> {
    let cli = Cli::parse_args();
    let config = RefileConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    match &cli.command {
        Commands::Rename(args) => {
            let result = commands::rename(args, &config, quiet)?;
            if result.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Preset { command } => commands::preset(command, &config, quiet)?,
        Commands::Methods => commands::methods(quiet),
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

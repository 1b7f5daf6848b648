//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for refile using the `clap` crate.
//!
//! # Commands
//!
//! - **rename**: Run a method pipeline over a set of files (default)
//! - **preset**: Manage saved method pipelines (list, show, save, delete)
//! - **methods**: Print the method syntax accepted by `--method`
//!
//! # Method syntax
//!
//! Methods are given with `-m` and applied in order:
//!
//! ```text
//! refile rename *.jpg -m 'case:lower' -m 'template:holiday_{n:1:3}'
//! refile rename notes.txt -m 'replace: :_' --dry-run
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::methods::NameTransform;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "refile")]
#[command(about = "A batch file renamer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rename files through a pipeline of methods
    #[command(visible_alias = "r")]
    Rename(RenameArgs),

    /// Manage saved presets
    #[command(visible_alias = "p")]
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },

    /// Show the syntax of every rename method
    Methods,
}

/// Arguments of the rename command
#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Files or folders to rename, processed in the order given
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Rename method, applied in order (e.g. `replace:old:new`, `case:lower`)
    #[arg(short = 'm', long = "method", value_name = "METHOD", value_parser = parse_method)]
    pub methods: Vec<NameTransform>,

    /// Run the methods of a saved preset before any `--method`
    #[arg(short = 'p', long = "preset", value_name = "NAME")]
    pub preset: Option<String>,

    /// Save the methods given on the command line as a preset
    #[arg(long = "save-preset", value_name = "NAME")]
    pub save_preset: Option<String>,

    /// Show what would be renamed without touching any file
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Ask whether to keep the changes after renaming, undoing them if not
    #[arg(long = "review", conflicts_with_all = ["dry_run", "json"])]
    pub review: bool,

    /// Print the batch result as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Allow total paths longer than 260 characters (overrides config)
    #[arg(long = "long-paths")]
    pub long_paths: bool,

    /// Do not refuse targets that already exist on disk (the rename itself still will)
    #[arg(long = "no-target-check")]
    pub no_target_check: bool,
}

/// Preset management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PresetCommands {
    /// List all saved presets
    #[command(visible_alias = "ls")]
    List,

    /// Show the methods of a preset
    Show {
        /// Name of the preset to show
        name: String,
    },

    /// Save a list of methods as a preset
    Save {
        /// Name of the preset
        name: String,

        /// Rename method, applied in order
        #[arg(
            short = 'm',
            long = "method",
            value_name = "METHOD",
            required = true,
            value_parser = parse_method
        )]
        methods: Vec<NameTransform>,

        /// Description of the preset
        #[arg(short = 'd', long = "description")]
        description: Option<String>,

        /// Replace an existing preset with the same name
        #[arg(short = 'f', long = "force")]
        force: bool,
    },

    /// Delete a preset
    #[command(visible_alias = "rm")]
    Delete {
        /// Name of the preset to delete
        name: String,

        /// Skip confirmation prompt
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

fn parse_method(s: &str) -> Result<NameTransform, String> {
    NameTransform::try_from(s).map_err(|e| e.to_string())
}

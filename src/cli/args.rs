//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Keeps hierarchical rank labels on backlog and schedule trees up to date
#[derive(Parser, Debug)]
#[command(name = "treenum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Label an outline file and show the result
    Renumber(RenumberArgs),

    /// Validate every configured behavior
    Check,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct RenumberArgs {
    /// Outline file (two spaces per level, optional " | label")
    #[arg(value_hint = ValueHint::FilePath)]
    pub outline: PathBuf,

    /// Project name (default: outline file stem)
    #[arg(short, long)]
    pub project: Option<String>,

    /// View: Agile, Scheduled, Bugs or Backlog
    #[arg(long)]
    pub view: Option<String>,

    /// Column receiving the labels
    #[arg(long)]
    pub column: Option<String>,

    /// Numbering style: Flat or Hierarchical
    #[arg(short, long)]
    pub style: Option<String>,

    /// Comma separated depths that get labels
    #[arg(short, long)]
    pub label_levels: Option<String>,

    /// Comma separated depths that never get labels
    #[arg(short, long)]
    pub ignore_levels: Option<String>,

    /// Write the labels back into the outline file
    #[arg(short, long)]
    pub write: bool,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented template
    Template,
    /// Show the global config file location
    Path,
}

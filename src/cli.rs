//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the roster. Without a subcommand the
//! interactive command loop starts.

use clap::{Parser, Subcommand};

/// Expedition Roster - interactive roster of expedition members
///
/// Keeps a list of members and their roles in a local JSON file and edits it
/// through a line-based command loop (add, list, count, remove).
#[derive(Parser, Debug)]
#[command(name = "expedition-roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "ROSTER_CONFIG", global = true)]
    pub config: Option<String>,

    /// Roster data file (overrides config and ROSTER_DATA_FILE)
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Do not print the greeting line
    #[arg(long, global = true)]
    pub no_banner: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive command loop (default)
    Repl,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Validate the configuration
    Validate,
}

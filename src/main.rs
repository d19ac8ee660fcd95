//! Expedition Roster - interactive roster of expedition members
//!
//! Entry point: parses arguments, loads configuration, sets up logging, opens
//! the roster store and runs the command loop on stdin/stdout.

mod cli;
mod config;
mod error;
mod logging;
mod repl;
mod roster;

use std::io;

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::config::RosterConfig;
use crate::error::{Error, Result};
use crate::repl::Session;
use crate::roster::Store;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { ref subcommand }) => {
            // Config commands use minimal logging
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand.clone(), &cli)
        }
        Some(Commands::Repl) | None => run_repl(&cli),
    }
}

/// Load configuration and fold in the command-line overrides
fn load_config(cli: &Cli) -> Result<RosterConfig> {
    let mut config = RosterConfig::load(cli.config.as_deref())?;

    if let Some(ref file) = cli.file {
        config.storage.data_file = config::expand_path(file);
    }
    if cli.no_banner {
        config.repl.banner = false;
    }

    Ok(config)
}

/// Run the interactive command loop
fn run_repl(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let (store, load_error) = Store::open(config.data_file(), config.role_set());
    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_file = %store.path().display(),
        roles = %store.roles(),
        members = store.count(),
        "Starting expedition roster"
    );

    let mut session = Session::new(store, io::stdout().lock());

    if let Some(ref e) = load_error {
        warn!(error = %e.format_for_log(), "Continuing with an empty roster");
        session.report(e)?;
    }
    if config.repl.banner {
        session.banner()?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let result = runtime.block_on(repl::run(&mut session, input, &config.repl.prompt));

    // A pending stdin read must not hold up process exit.
    runtime.shutdown_background();

    result
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand, cli: &Cli) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = load_config(cli)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let created = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", created.display());
        }
        ConfigSubcommand::Validate => {
            load_config(cli)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}

//! seteuk CLI: the main entry point.
//!
//! Commands:
//! - `onboard` : Initialize config & document directory
//! - `generate`: Draft a record from reports, code and notes
//! - `revise`  : Fix spelling and spacing of an existing record
//! - `count`   : Show character and byte counts
//! - `history` : Browse and edit past results
//! - `kb`      : Manage the per-category knowledge base
//! - `key`     : Store or clear the API key
//! - `status`  : Show configuration summary

use clap::{Parser, Subcommand};

mod commands;
mod files;
mod runtime;

#[derive(Parser)]
#[command(
    name = "seteuk",
    about = "seteuk — student activity record drafting assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and document directory
    Onboard,

    /// Generate a record
    Generate(commands::generate::GenerateArgs),

    /// Correct spelling and spacing of existing text
    Revise(commands::revise::ReviseArgs),

    /// Count characters and record-system bytes
    Count(commands::count::CountArgs),

    /// Browse and edit past results
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },

    /// Manage the knowledge base of a category
    Kb {
        #[command(subcommand)]
        action: commands::kb::KbAction,
    },

    /// Store or clear the API key
    Key {
        #[command(subcommand)]
        action: commands::key::KeyAction,
    },

    /// Show configuration status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Generate(args) => commands::generate::run(args).await?,
        Commands::Revise(args) => commands::revise::run(args).await?,
        Commands::Count(args) => commands::count::run(args)?,
        Commands::History { action } => commands::history::run(action)?,
        Commands::Kb { action } => commands::kb::run(action)?,
        Commands::Key { action } => commands::key::run(action)?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}

//! Darkroom CLI - ingest untrusted images into canonical, atomic storage.
//!
//! Darkroom validates arbitrary files as images, normalizes and re-encodes
//! them as JPEG, and persists them under random, traversal-safe names. The
//! resulting asset references are printed as JSON for downstream storage.
//!
//! # Usage
//!
//! ```bash
//! # Ingest a single file
//! darkroom ingest photo.png
//!
//! # Ingest a directory into a specific storage root
//! darkroom ingest ./uploads/ --storage-root ./media
//!
//! # View configuration
//! darkroom config show
//!
//! # Clear orphaned temp files from the storage root
//! darkroom sweep
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Darkroom - untrusted-image ingestion into canonical, atomic storage.
#[derive(Parser, Debug)]
#[command(name = "darkroom")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest image files or directories into the storage root
    Ingest(cli::ingest::IngestArgs),

    /// Remove orphaned temp files from the storage root
    Sweep(cli::sweep::SweepArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go to eprintln.
    let config = match darkroom_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `darkroom config path`."
            );
            darkroom_core::Config::default()
        }
    };
    logging::init(&config.logging, cli.verbose, cli.json_logs);

    tracing::debug!("Darkroom v{}", darkroom_core::VERSION);

    match cli.command {
        Commands::Ingest(args) => cli::ingest::execute(args, config).await,
        Commands::Sweep(args) => cli::sweep::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}

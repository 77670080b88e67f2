//! Ormlet CLI
//!
//! Command-line interface for the Ormlet metadata core.

use clap::Parser;
use ormlet_cli::{Cli, Commands};
use ormlet_core::OrmError;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), OrmError> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Check(cmd) => {
            cmd.execute(&cli.base_dir, &cli.settings)?;
        }
        Commands::Show(cmd) => {
            cmd.execute(&cli.base_dir, &cli.settings)?;
        }
        Commands::Init(cmd) => {
            cmd.execute()?;
        }
    }

    Ok(())
}

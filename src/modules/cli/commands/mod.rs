//! CLI commands

mod check;
mod init;
mod show;

pub use check::CheckCommand;
pub use init::InitCommand;
pub use show::ShowCommand;

use clap::{Parser, Subcommand};

/// Ormlet - XML-driven metadata core for a micro ORM
#[derive(Parser, Debug)]
#[command(name = "ormlet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file path
    ///
    /// This is a *global* option so it can be specified after subcommands,
    /// e.g. `ormlet check -f settings.yaml`.
    #[arg(
        short = 'f',
        long = "file",
        global = true,
        default_value = "ormlet.yaml"
    )]
    pub settings: String,

    /// Base directory the configured subfolders resolve against
    #[arg(short = 'C', long = "base-dir", global = true, default_value = ".")]
    pub base_dir: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the configuration and print diagnostics
    Check(CheckCommand),

    /// Print the loaded template and mapping catalogs
    Show(ShowCommand),

    /// Scaffold a starter Ormlet project
    Init(InitCommand),
}

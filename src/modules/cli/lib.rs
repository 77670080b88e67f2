//! Ormlet CLI
//!
//! This crate provides the command-line interface for Ormlet including:
//! - check: Load the configuration and print diagnostics
//! - show: Print the loaded template and mapping catalogs
//! - init: Scaffold a starter Ormlet project

pub mod commands;

pub use commands::{Cli, Commands};

//! Check command implementation

use clap::Args;
use ormlet_core::OrmError;
use ormlet_parser::{lint_placeholders, Settings};
use ormlet_runtime::ConfigState;
use ormlet_types::SqlOperation;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Treat placeholder warnings as failures
    #[arg(long)]
    pub strict: bool,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, base_dir: &str, settings_path: &str) -> Result<(), OrmError> {
        let settings = Settings::from_file(settings_path)?;
        let state = ConfigState::load(base_dir, settings)?;

        println!("Configuration loaded from '{}'", base_dir);
        for operation in SqlOperation::all() {
            println!(
                "  {} templates: {}",
                operation,
                state.templates().category(*operation).len()
            );
        }
        println!("  mapped tables: {}", state.mappings().len());

        match state.connection() {
            Some(connection) => println!(
                "  connection: '{}' ({})",
                connection.name, connection.provider
            ),
            None => println!("  connection: unresolved (see log)"),
        }
        match state.last_insert_id_command() {
            Some(_) => println!("  last-inserted-id statement: available"),
            None => println!("  last-inserted-id statement: unavailable"),
        }

        let notes = lint_placeholders(state.templates());
        for note in &notes {
            println!("  warning: {}", note);
        }
        if self.strict && !notes.is_empty() {
            return Err(OrmError::Configuration(format!(
                "{} placeholder warning(s) in strict mode",
                notes.len()
            )));
        }

        println!("OK");
        Ok(())
    }
}

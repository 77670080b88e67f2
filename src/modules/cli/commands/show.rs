//! Show command implementation

use clap::Args;
use ormlet_core::OrmError;
use ormlet_parser::Settings;
use ormlet_runtime::ConfigState;
use ormlet_types::SqlOperation;

/// Show command arguments
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Only print the template catalog
    #[arg(long)]
    pub templates: bool,

    /// Only print the mapping table
    #[arg(long)]
    pub mappings: bool,
}

impl ShowCommand {
    /// Execute the show command
    pub fn execute(&self, base_dir: &str, settings_path: &str) -> Result<(), OrmError> {
        let settings = Settings::from_file(settings_path)?;
        let state = ConfigState::load(base_dir, settings)?;

        // With no selector, print everything.
        let all = !self.templates && !self.mappings;

        if self.templates || all {
            for operation in SqlOperation::all() {
                let names = state.templates().names(*operation);
                if names.is_empty() {
                    continue;
                }
                println!("{} templates:", operation);
                for name in names {
                    let text = state.template(*operation, name).unwrap_or_default();
                    println!("  {} = {}", name, text);
                }
            }
        }

        if self.mappings || all {
            for table in state.mappings().table_keys() {
                println!("table {}:", table);
                if let Ok(map) = state.mapping_for(table) {
                    for (property, column) in map.iter() {
                        println!("  {} -> {}", property, column);
                    }
                }
            }
        }

        Ok(())
    }
}

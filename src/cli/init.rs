//! Init command: create the 13 token files.

use clap::Args;

use crate::cli::common::{CliError, CliResult, GlobalOptions};

/// Create any missing token files as empty documents
#[derive(Debug, Clone, Args)]
pub struct InitArgs {}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;
        let store = global.store(&config);

        let created = store
            .init()
            .map_err(|e| CliError::io(format!("Failed to initialize token files: {e}")))?;

        if created.is_empty() {
            println!("All token files already exist in {}", store.root().display());
        } else {
            for file in &created {
                println!("✓ Created {file}");
            }
            println!(
                "\nInitialized {} token file(s) in {}",
                created.len(),
                store.root().display()
            );
        }

        Ok(())
    }
}

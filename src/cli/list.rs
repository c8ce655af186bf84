//! List command: show Language-layer tokens grouped by entry.

use clap::Args;

use crate::cli::common::{print_json, CliResult, GlobalOptions};
use crate::services::ListQuery;

/// List existing content entries
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Restrict to a domain (e.g., "nav")
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Only show one tone (full name or abbreviation)
    #[arg(long)]
    pub tone: Option<String>,

    /// Only show one text type (full name or abbreviation)
    #[arg(long = "type", value_name = "TYPE")]
    pub text_type: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;
        let service = global.service(&config)?;

        let listing = service.list(&ListQuery {
            domain: self.domain.clone(),
            tone: self.tone.clone(),
            text_type: self.text_type.clone(),
        })?;

        if self.json {
            return print_json(&listing);
        }

        if listing.entries.is_empty() {
            println!("No entries found.");
            return Ok(());
        }

        for (entry, tokens) in &listing.entries {
            println!("{entry}");
            for token in tokens {
                println!("  {:<5} {:<6} {}", token.tone, token.text_type, token.value);
            }
        }
        println!("\n{} entries", listing.entries.len());

        Ok(())
    }
}

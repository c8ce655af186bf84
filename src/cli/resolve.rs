//! Resolve command: follow one token through the Tone, Type and Language files.

use clap::Args;

use crate::cli::common::{print_json, CliError, CliResult, GlobalOptions};

/// Show how a tone/type variant of an entry resolves to literal text
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Content domain (e.g., "nav")
    #[arg(short, long)]
    pub domain: String,

    /// Entry name within the domain
    #[arg(short, long)]
    pub name: String,

    /// Tone (full name or abbreviation)
    #[arg(long)]
    pub tone: String,

    /// Text type (full name or abbreviation)
    #[arg(long = "type", value_name = "TYPE")]
    pub text_type: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    /// Execute the resolve command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;
        let service = global.service(&config)?;

        let resolution = service
            .resolve(&self.domain, &self.name, &self.tone, &self.text_type)?
            .ok_or_else(|| {
                CliError::validation(format!(
                    "No resolvable token for {}.{} ({} / {})",
                    self.domain, self.name, self.tone, self.text_type
                ))
            })?;

        if self.json {
            return print_json(&resolution);
        }

        for step in &resolution.steps {
            println!("{:<32} {} = {}", step.file, step.path, step.value);
        }
        println!("\n{}", resolution.text);

        Ok(())
    }
}

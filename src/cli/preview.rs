//! Preview command: show the tokens an entry would produce.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{print_json, read_content_file, CliResult, GlobalOptions};
use crate::services::ApplyService;

/// Preview the tokens for a content matrix without touching any file
#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Content domain (e.g., "nav", "legal.copyright")
    #[arg(short, long)]
    pub domain: String,

    /// Entry name within the domain
    #[arg(short, long)]
    pub name: String,

    /// Path to the content matrix JSON file
    #[arg(short, long, value_name = "FILE")]
    pub content: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PreviewArgs {
    /// Execute the preview command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;
        let service = ApplyService::new(global.store(&config));
        let content = read_content_file(&self.content)?;

        let preview = service.preview(&self.domain, &self.name, &content)?;

        if self.json {
            return print_json(&preview);
        }

        for file in &preview.files {
            println!("{} ({}, {} tokens)", file.file, file.layer, file.token_count);
            for (path, value) in &file.tokens {
                println!("  {path} = {}", value.as_str().unwrap_or_default());
            }
            println!();
        }
        println!(
            "{} tokens across {} files",
            preview.total_tokens,
            preview.files.len()
        );

        Ok(())
    }
}

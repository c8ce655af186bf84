//! Apply command: merge a pre-generated content matrix into the token files.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{print_json, read_content_file, CliResult, GlobalOptions};
use crate::services::{ApplyRequest, ApplyResult};

/// Apply a content matrix JSON file to all 13 token files
#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Content domain (e.g., "nav", "legal.copyright")
    #[arg(short, long)]
    pub domain: String,

    /// Entry name within the domain
    #[arg(short, long)]
    pub name: String,

    /// Path to the content matrix JSON file
    #[arg(short, long, value_name = "FILE")]
    pub content: PathBuf,

    /// Check for duplicates and count tokens without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ApplyArgs {
    /// Execute the apply command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;
        let service = global.service(&config)?;
        let content = read_content_file(&self.content)?;

        let result = service.apply(&ApplyRequest {
            domain: self.domain.clone(),
            name: self.name.clone(),
            content,
            dry_run: self.dry_run,
        })?;

        if self.json {
            print_json(&result)
        } else {
            print_apply_result(&result, self.dry_run);
            Ok(())
        }
    }
}

/// Prints a per-file summary of an apply.
pub fn print_apply_result(result: &ApplyResult, dry_run: bool) {
    for change in &result.files_modified {
        println!("  {:<32} +{}", change.file, change.tokens_added);
    }

    if dry_run {
        println!(
            "[DRY RUN] Would write {} tokens to {} files.",
            result.total_tokens,
            result.files_modified.len()
        );
    } else {
        println!(
            "Written {} tokens to {} files.",
            result.total_tokens,
            result.files_modified.len()
        );
    }
}

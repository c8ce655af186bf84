//! Add command: generate content for one or more entries and apply it.
//!
//! Each entry goes through resolve → duplicate check → generate → preview →
//! confirm → apply. A failing entry is reported and the batch moves on.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliError, CliResult, GlobalOptions};
use crate::error::TokenError;
use crate::models::{ContentMatrix, TONES, TYPES};
use crate::services::entries::{expand_names, read_names_file, resolve_entry, ResolvedEntry};
use crate::services::{
    generate_content, ApplyRequest, ApplyService, ContentGenerator, GenerateRequest,
};
use crate::tokens::ReferenceKeyGenerator;

/// Generate tone/type content for entries and write it to the token files
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Entry names, comma-separated or repeated (e.g., "nav.Dashboard,Settings")
    #[arg(value_name = "NAMES")]
    pub names: Vec<String>,

    /// Domain for names without dot notation
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Read names from a file, one per line
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Prompt for names on stdin
    #[arg(long)]
    pub interactive: bool,

    /// Extra guidance passed to the generator
    #[arg(short, long)]
    pub context: Option<String>,

    /// Apply without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Generate and count tokens without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Output the batch summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Settings for one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Domain for names without dot notation.
    pub default_domain: Option<String>,
    /// Extra guidance passed to the generator.
    pub context: Option<String>,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    /// Do not write files.
    pub dry_run: bool,
    /// Generation attempts per entry.
    pub max_attempts: u32,
    /// Suppress human-readable progress output.
    pub quiet: bool,
}

/// An entry that could not be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    /// Raw name or `domain.name`.
    pub entry: String,
    /// Failure message.
    pub error: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Entries written (or that would be written on a dry run).
    pub added: Vec<String>,
    /// Entries that already existed or were declined.
    pub skipped: Vec<String>,
    /// Entries that failed to resolve, generate or apply.
    pub failed: Vec<FailedEntry>,
}

impl BatchSummary {
    /// `N added, M skipped, K failed`
    pub fn line(&self) -> String {
        format!(
            "{} added, {} skipped, {} failed",
            self.added.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }

    fn fail(&mut self, options: &BatchOptions, entry: String, err: &TokenError) {
        report(options, &format!("✗ {entry}: {err}"));
        self.failed.push(FailedEntry {
            entry,
            error: err.to_string(),
        });
    }
}

impl AddArgs {
    /// Execute the add command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;
        let service = global.service(&config)?;
        let generator = config.generation.generator().ok_or_else(|| {
            CliError::validation(
                "No generation command configured. Run `config set --command <PROGRAM>` first.",
            )
        })?;

        let stdin = io::stdin();
        let mut input = stdin.lock();

        let mut names = expand_names(&self.names);
        if let Some(path) = &self.input {
            names.extend(read_names_file(path)?);
        }
        if self.interactive {
            names.extend(prompt_names(&mut input)?);
        }
        if names.is_empty() {
            return Err(CliError::validation(
                "No entry names given. Pass NAMES, --input FILE or --interactive.",
            ));
        }

        let options = BatchOptions {
            default_domain: self.domain.clone(),
            context: self.context.clone(),
            assume_yes: self.yes,
            dry_run: self.dry_run,
            max_attempts: config.generation.max_attempts,
            quiet: self.json,
        };
        let summary = run_batch(&service, &generator, &names, &options, &mut input)?;

        if self.json {
            print_json(&summary)?;
        } else {
            println!("\n{}", summary.line());
        }

        if summary.failed.is_empty() {
            Ok(())
        } else {
            Err(CliError::validation(format!(
                "{} of {} entries failed",
                summary.failed.len(),
                names.len()
            )))
        }
    }
}

/// Reads names from `input` until a blank line or end of input.
fn prompt_names(input: &mut impl BufRead) -> CliResult<Vec<String>> {
    println!("Enter entry names (comma-separated or one per line, blank line to finish):");
    let mut names = Vec::new();
    loop {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|e| CliError::io(format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| CliError::io(format!("Failed to read input: {e}")))?;
        if read == 0 || line.trim().is_empty() {
            break;
        }
        names.extend(expand_names(&[line.trim()]));
    }
    Ok(names)
}

/// Runs the add flow over `names`.
///
/// Confirmation answers are read from `input` unless `assume_yes` or
/// `dry_run` is set. Every failure, including an unreadable token file, is
/// recorded against its entry and the batch moves on. A `domain.name` seen
/// earlier in the same batch is skipped.
pub fn run_batch<G: ReferenceKeyGenerator>(
    service: &ApplyService<G>,
    generator: &dyn ContentGenerator,
    names: &[String],
    options: &BatchOptions,
    input: &mut impl BufRead,
) -> CliResult<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut seen = HashSet::new();

    for raw in names {
        let entry = match resolve_entry(raw, options.default_domain.as_deref()) {
            Ok(entry) => entry,
            Err(e) => {
                summary.fail(options, raw.clone(), &e);
                continue;
            }
        };
        let path = entry.path();

        if !seen.insert(path.clone()) {
            report(options, &format!("⊘ {path} already in this batch, skipping"));
            summary.skipped.push(path);
            continue;
        }

        match service.is_duplicate(&entry.domain, &entry.name) {
            Ok(false) => {}
            Ok(true) => {
                report(options, &format!("⊘ {path} already exists, skipping"));
                summary.skipped.push(path);
                continue;
            }
            Err(e) => {
                summary.fail(options, path, &e);
                continue;
            }
        }

        report(options, &format!("\nGenerating {path}..."));
        let request = request_for(&entry, options);
        let content = match generate_content(generator, &request, options.max_attempts) {
            Ok(content) => content,
            Err(e) => {
                summary.fail(options, path, &e);
                continue;
            }
        };

        if !options.quiet {
            print_content_table(&content);
        }

        let preview = match service.preview(&entry.domain, &entry.name, &content) {
            Ok(preview) => preview,
            Err(e) => {
                summary.fail(options, path, &e);
                continue;
            }
        };
        report(
            options,
            &format!(
                "Will write {} tokens to {} files.",
                preview.total_tokens,
                preview.files.len()
            ),
        );

        if !options.assume_yes && !options.dry_run && !confirm(&path, input)? {
            report(options, &format!("⊘ {path} declined"));
            summary.skipped.push(path);
            continue;
        }

        let request = ApplyRequest {
            domain: entry.domain.clone(),
            name: entry.name.clone(),
            content,
            dry_run: options.dry_run,
        };
        match service.apply(&request) {
            Ok(result) => {
                let prefix = if options.dry_run { "[DRY RUN] " } else { "" };
                report(
                    options,
                    &format!(
                        "✓ {prefix}{path}: {} tokens in {} files",
                        result.total_tokens,
                        result.files_modified.len()
                    ),
                );
                summary.added.push(path);
            }
            Err(TokenError::DuplicateEntry(_)) => {
                report(options, &format!("⊘ {path} already exists, skipping"));
                summary.skipped.push(path);
            }
            Err(e) => summary.fail(options, path, &e),
        }
    }

    Ok(summary)
}

fn request_for(entry: &ResolvedEntry, options: &BatchOptions) -> GenerateRequest {
    GenerateRequest {
        domain: entry.domain.clone(),
        name: entry.name.clone(),
        neutral_title: entry.neutral_title.clone(),
        context: options.context.clone(),
    }
}

fn report(options: &BatchOptions, message: &str) {
    if !options.quiet {
        println!("{message}");
    }
}

fn confirm(path: &str, input: &mut impl BufRead) -> CliResult<bool> {
    print!("Apply {path}? [y/N] ");
    io::stdout()
        .flush()
        .map_err(|e| CliError::io(format!("Failed to write prompt: {e}")))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| CliError::io(format!("Failed to read confirmation: {e}")))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_content_table(content: &ContentMatrix) {
    for tone in &TONES {
        for (i, text_type) in TYPES.iter().enumerate() {
            let label = if i == 0 { tone.full } else { "" };
            println!(
                "  {label:<8} {:<12} {}",
                text_type.full,
                content.cell(tone.tone, text_type.text_type)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TokenStore;
    use crate::tokens::{SequentialReferenceKeys, TokenBuilder};
    use serde_json::json;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct FixedGenerator(anyhow::Result<String>);

    impl ContentGenerator for FixedGenerator {
        fn generate(&self, request: &GenerateRequest) -> anyhow::Result<String> {
            match &self.0 {
                Ok(_) => {
                    let entry = json!({
                        "title": request.neutral_title,
                        "subtitle": "Overview",
                        "description": "Everything in one place.",
                        "caption": "Live",
                        "abbreviation": "DB",
                        "emoji": "📊"
                    });
                    Ok(json!({
                        "neutral": entry, "formal": entry, "playful": entry,
                        "minimal": entry, "witty": entry, "quirky": entry
                    })
                    .to_string())
                }
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    fn service(temp_dir: &TempDir) -> ApplyService<SequentialReferenceKeys> {
        let store = TokenStore::new(temp_dir.path());
        store.init().unwrap();
        ApplyService::with_builder(
            store,
            TokenBuilder::with_key_generator(SequentialReferenceKeys::new()),
        )
    }

    fn options() -> BatchOptions {
        BatchOptions {
            assume_yes: true,
            max_attempts: 2,
            quiet: true,
            ..BatchOptions::default()
        }
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_batch_adds_skips_and_fails() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let generator = FixedGenerator(Ok(String::new()));

        let summary = run_batch(
            &service,
            &generator,
            &names(&["nav.Dashboard", "nav.dashboard", "Orphan"]),
            &options(),
            &mut Cursor::new(""),
        )
        .unwrap();

        assert_eq!(summary.added, vec!["nav.dashboard"]);
        assert_eq!(summary.skipped, vec!["nav.dashboard"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].entry, "Orphan");
        assert_eq!(summary.line(), "1 added, 1 skipped, 1 failed");
    }

    #[test]
    fn test_generation_failure_does_not_stop_batch() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let generator = FixedGenerator(Err(anyhow::anyhow!("model unavailable")));

        let summary = run_batch(
            &service,
            &generator,
            &names(&["nav.home", "nav.settings"]),
            &options(),
            &mut Cursor::new(""),
        )
        .unwrap();

        assert!(summary.added.is_empty());
        assert_eq!(summary.failed.len(), 2);
        assert!(summary.failed[0].error.contains("model unavailable"));
    }

    #[test]
    fn test_declined_entry_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let generator = FixedGenerator(Ok(String::new()));
        let options = BatchOptions {
            assume_yes: false,
            ..options()
        };

        let summary = run_batch(
            &service,
            &generator,
            &names(&["nav.home", "nav.settings"]),
            &options,
            &mut Cursor::new("n\ny\n"),
        )
        .unwrap();

        assert_eq!(summary.skipped, vec!["nav.home"]);
        assert_eq!(summary.added, vec!["nav.settings"]);
        assert!(!service.is_duplicate("nav", "home").unwrap());
        assert!(service.is_duplicate("nav", "settings").unwrap());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let generator = FixedGenerator(Ok(String::new()));
        let options = BatchOptions {
            assume_yes: false,
            dry_run: true,
            ..options()
        };

        let summary = run_batch(
            &service,
            &generator,
            &names(&["Home"]),
            &BatchOptions {
                default_domain: Some("nav".to_string()),
                ..options
            },
            &mut Cursor::new(""),
        )
        .unwrap();

        assert_eq!(summary.added, vec!["nav.home"]);
        assert!(!service.is_duplicate("nav", "home").unwrap());
    }

    #[test]
    fn test_unreadable_token_file_fails_entries_not_batch() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        std::fs::write(temp_dir.path().join("Tone.Quirky.tokens.json"), "{ broken").unwrap();
        let generator = FixedGenerator(Ok(String::new()));

        let summary = run_batch(
            &service,
            &generator,
            &names(&["nav.home", "nav.settings", "Orphan"]),
            &options(),
            &mut Cursor::new(""),
        )
        .unwrap();

        assert!(summary.added.is_empty());
        assert_eq!(
            summary
                .failed
                .iter()
                .map(|f| f.entry.as_str())
                .collect::<Vec<_>>(),
            vec!["nav.home", "nav.settings", "Orphan"]
        );
        assert!(summary.failed[0].error.contains("Tone.Quirky.tokens.json"));
        assert_eq!(summary.line(), "0 added, 0 skipped, 3 failed");
    }

    #[test]
    fn test_dry_run_skips_repeated_entry() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(&temp_dir);
        let generator = FixedGenerator(Ok(String::new()));
        let options = BatchOptions {
            dry_run: true,
            ..options()
        };

        let summary = run_batch(
            &service,
            &generator,
            &names(&["nav.home", "nav.Home", "nav.settings"]),
            &options,
            &mut Cursor::new(""),
        )
        .unwrap();

        assert_eq!(summary.added, vec!["nav.home", "nav.settings"]);
        assert_eq!(summary.skipped, vec!["nav.home"]);
    }

    #[test]
    fn test_prompt_names_stops_at_blank_line() {
        let mut input = Cursor::new("nav.home, nav.settings\nnav.profile\n\nnav.ignored\n");
        let names = prompt_names(&mut input).unwrap();
        assert_eq!(names, vec!["nav.home", "nav.settings", "nav.profile"]);
    }
}

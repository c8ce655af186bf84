//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult, GlobalOptions};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Directory holding the token files
    #[arg(long, value_name = "DIR")]
    tokens_dir: Option<PathBuf>,

    /// External content generation command
    #[arg(long, value_name = "PROGRAM")]
    command: Option<String>,

    /// Argument for the generation command (repeatable, replaces existing)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    args: Vec<String>,

    /// Generation attempts per entry
    #[arg(long, value_name = "N")]
    max_attempts: Option<u32>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(global),
            ConfigCommand::Set(args) => args.execute(global),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        let config = global.config()?;

        if self.json {
            return print_json(&config);
        }

        println!("Configuration:");
        println!(
            "  Tokens directory: {}",
            config.tokens_dir(global.tokens_dir.as_deref()).display()
        );
        match &config.generation.command {
            Some(command) if config.generation.args.is_empty() => {
                println!("  Generator:        {command}");
            }
            Some(command) => {
                println!(
                    "  Generator:        {command} {}",
                    config.generation.args.join(" ")
                );
            }
            None => println!("  Generator:        (not configured)"),
        }
        println!("  Max attempts:     {}", config.generation.max_attempts);

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        if self.tokens_dir.is_none()
            && self.command.is_none()
            && self.args.is_empty()
            && self.max_attempts.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --tokens-dir, --command, --arg, or --max-attempts",
            ));
        }

        let mut config = global.config()?;

        if let Some(dir) = &self.tokens_dir {
            config.paths.tokens_dir = Some(dir.clone());
            println!("✓ Tokens directory set to: {}", dir.display());
        }

        if let Some(command) = &self.command {
            config.generation.command = Some(command.clone());
            println!("✓ Generator command set to: {command}");
        }

        if !self.args.is_empty() {
            config.generation.args = self.args.clone();
            println!("✓ Generator args set to: {}", self.args.join(" "));
        }

        if let Some(max_attempts) = self.max_attempts {
            config.generation.max_attempts = max_attempts;
            println!("✓ Max attempts set to: {max_attempts}");
        }

        let saved = match &global.config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        saved.map_err(|e| CliError::validation(format!("Failed to save configuration: {e:#}")))?;

        Ok(())
    }
}

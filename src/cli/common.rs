//! Shared types for CLI command handlers.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::TokenError;
use crate::models::ContentMatrix;
use crate::services::{ApplyService, TokenStore};

/// Process exit codes used by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed.
    Success = 0,
    /// Input was rejected (duplicate entry, invalid content, failed entries).
    ValidationError = 1,
    /// Filesystem or persisted document problem.
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit status.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a command handler.
#[derive(Debug)]
pub struct CliError {
    /// Exit code to terminate with.
    pub code: ExitCode,
    /// Message printed after `Error: `.
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<TokenError> for CliError {
    fn from(err: TokenError) -> Self {
        if err.is_storage_error() {
            Self::io(err.to_string())
        } else {
            Self::validation(err.to_string())
        }
    }
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--tokens-dir` override.
    pub tokens_dir: Option<PathBuf>,
    /// `--config` override.
    pub config_path: Option<PathBuf>,
}

impl GlobalOptions {
    /// Loads the configuration file.
    pub fn config(&self) -> CliResult<Config> {
        let loaded = match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        loaded.map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))
    }

    /// Opens the token store, resolving the directory from flag and config.
    pub fn store(&self, config: &Config) -> TokenStore {
        TokenStore::new(config.tokens_dir(self.tokens_dir.as_deref()))
    }

    /// Opens the apply service, failing if any token file is missing.
    pub fn service(&self, config: &Config) -> CliResult<ApplyService> {
        let store = self.store(config);
        let missing = store.missing_files();
        if !missing.is_empty() {
            return Err(CliError::io(format!(
                "Token files missing in {}: {}. Run `init` first.",
                store.root().display(),
                missing.join(", ")
            )));
        }
        Ok(ApplyService::new(store))
    }
}

/// Reads a content matrix JSON file.
pub fn read_content_file(path: &Path) -> CliResult<ContentMatrix> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
    ContentMatrix::from_json(&raw).map_err(CliError::from)
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_mapping() {
        let dup: CliError = TokenError::DuplicateEntry("nav.home".to_string()).into();
        assert_eq!(dup.code, ExitCode::ValidationError);

        let malformed: CliError = TokenError::MalformedDocument {
            file: "x".to_string(),
            reason: "eof".to_string(),
        }
        .into();
        assert_eq!(malformed.code, ExitCode::IoError);
        assert_eq!(malformed.code.code(), 2);
    }
}

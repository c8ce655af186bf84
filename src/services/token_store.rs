//! Token document persistence.
//!
//! Documents are read in full and rewritten in full. Writes go through a
//! temp file + rename so a document is never left half-written.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{TokenError, TokenResult};
use crate::models::registry::all_files;
use crate::tokens::Document;

/// Reads and writes the token files under one directory.
#[derive(Debug, Clone)]
pub struct TokenStore {
    root: PathBuf,
}

impl TokenStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the token files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a token file.
    pub fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Reads and parses a token document.
    ///
    /// A missing file is an I/O error; invalid JSON or a non-object root is
    /// a malformed document. Neither is replaced by an empty document.
    pub fn read(&self, file: &str) -> TokenResult<Document> {
        let path = self.path(file);
        let raw = fs::read_to_string(&path).map_err(|e| TokenError::io(&path, e))?;

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(doc)) => Ok(doc),
            Ok(_) => Err(TokenError::MalformedDocument {
                file: file.to_string(),
                reason: "root is not a JSON object".to_string(),
            }),
            Err(e) => Err(TokenError::MalformedDocument {
                file: file.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Serializes a document with two-space indentation and a trailing newline.
    pub fn write(&self, file: &str, doc: &Document) -> TokenResult<()> {
        let path = self.path(file);
        let mut content = serde_json::to_string_pretty(doc)?;
        content.push('\n');

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|e| TokenError::io(&temp_path, e))?;
        fs::rename(&temp_path, &path).map_err(|e| TokenError::io(&path, e))?;

        debug!(file, "wrote token document");
        Ok(())
    }

    /// Creates any of the 13 token files that do not exist yet as `{}`.
    ///
    /// Existing files are left untouched. Returns the names of files created.
    pub fn init(&self) -> TokenResult<Vec<&'static str>> {
        fs::create_dir_all(&self.root).map_err(|e| TokenError::io(&self.root, e))?;

        let mut created = Vec::new();
        for file in all_files() {
            if self.path(file).exists() {
                continue;
            }
            self.write(file, &Document::new())?;
            created.push(file);
        }
        Ok(created)
    }

    /// Returns the token files that are missing from the directory.
    pub fn missing_files(&self) -> Vec<&'static str> {
        all_files()
            .into_iter()
            .filter(|file| !self.path(file).exists())
            .collect()
    }
}

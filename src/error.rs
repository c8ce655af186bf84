//! Error type shared by the token engine and its services.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Failures raised while building, merging, persisting or generating tokens.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The `domain.name` entry already exists in the Language document.
    #[error("Content entry \"{0}\" already exists")]
    DuplicateEntry(String),

    /// A Type-layer abbreviation is not in the type registry.
    #[error("Unknown text type: {0}")]
    UnknownType(String),

    /// A Tone-layer abbreviation is not in the tone registry.
    #[error("Unknown tone: {0}")]
    UnknownTone(String),

    /// A persisted token document could not be parsed.
    #[error("Malformed token document {file}: {reason}")]
    MalformedDocument {
        /// File name of the document.
        file: String,
        /// Parser message.
        reason: String,
    },

    /// Reading or writing a token document failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A content matrix is missing cells or has empty strings.
    #[error("Invalid content matrix: {0}")]
    InvalidContent(String),

    /// The generation collaborator did not produce valid content.
    #[error("Content generation failed after {attempts} attempt(s): {reason}")]
    Generation {
        /// Number of attempts made.
        attempts: u32,
        /// Last failure reason.
        reason: String,
    },

    /// A raw entry name could not be resolved into domain and name.
    #[error("{0}")]
    InvalidEntry(String),

    /// A token tree could not be serialized.
    #[error("Failed to serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TokenError {
    /// Builds an [`TokenError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for failures caused by the filesystem or persisted data
    /// rather than by the request itself.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::MalformedDocument { .. })
    }
}

//! Token leaf in the design tool's JSON format.

use serde::{Deserialize, Serialize};

/// Scope tag that makes a token selectable as text content in the design tool.
pub const TEXT_CONTENT_SCOPE: &str = "TEXT_CONTENT";

/// The `$type` marker for every token this crate writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Text token.
    #[default]
    Text,
}

/// Which of the three files families a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Literal strings.
    Language,
    /// References into the Language layer, one file per text type.
    Type,
    /// User-facing selectors, one file per tone.
    Tone,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Language => write!(f, "language"),
            Self::Type => write!(f, "type"),
            Self::Tone => write!(f, "tone"),
        }
    }
}

/// Per-platform identifiers for a token path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSyntax {
    /// CSS custom property reference.
    #[serde(rename = "WEB")]
    pub web: String,
    /// Android resource name.
    #[serde(rename = "ANDROID")]
    pub android: String,
    /// iOS camelCase identifier.
    #[serde(rename = "iOS")]
    pub ios: String,
}

/// Design-tool specific metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigmaExtensions {
    /// Where the token may be picked in the design tool.
    pub scopes: Vec<String>,
    /// Platform identifiers.
    #[serde(rename = "codeSyntax")]
    pub code_syntax: CodeSyntax,
    /// Whether the token is hidden when the library is published.
    #[serde(rename = "hiddenFromPublishing")]
    pub hidden_from_publishing: bool,
    /// Opaque key tracking a reference across renames (Type and Tone layers).
    #[serde(
        rename = "referenceKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_key: Option<String>,
}

/// The `$extensions` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenExtensions {
    /// Figma metadata.
    pub figma: FigmaExtensions,
}

/// A single token leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Always text.
    #[serde(rename = "$type")]
    pub kind: TokenKind,
    /// Literal string or `{dot.path}` reference.
    #[serde(rename = "$value")]
    pub value: String,
    /// Metadata block.
    #[serde(rename = "$extensions")]
    pub extensions: TokenExtensions,
}

impl Token {
    /// Creates a text token.
    pub fn text(
        value: impl Into<String>,
        scopes: Vec<String>,
        code_syntax: CodeSyntax,
        hidden_from_publishing: bool,
        reference_key: Option<String>,
    ) -> Self {
        Self {
            kind: TokenKind::Text,
            value: value.into(),
            extensions: TokenExtensions {
                figma: FigmaExtensions {
                    scopes,
                    code_syntax,
                    hidden_from_publishing,
                    reference_key,
                },
            },
        }
    }

    /// Returns the reference key, if any.
    pub fn reference_key(&self) -> Option<&str> {
        self.extensions.figma.reference_key.as_deref()
    }
}

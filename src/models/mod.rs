//! Data models for generated content and design tokens.
//!
//! This module contains the tone/type registries, the content matrix produced
//! by the generation collaborator, and the token leaf format written to disk.

pub mod content;
pub mod registry;
pub mod token;

// Re-export commonly used types
pub use content::{ContentEntry, ContentMatrix};
pub use registry::{
    TextType, Tone, ToneDefinition, TypeDefinition, LANGUAGE_FILE, TONES, TYPES,
};
pub use token::{CodeSyntax, FigmaExtensions, Layer, Token, TokenKind, TEXT_CONTENT_SCOPE};

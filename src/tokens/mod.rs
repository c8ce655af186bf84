//! Token matrix construction and merge engine.
//!
//! - [`code_syntax`]: platform identifiers for a token path
//! - [`nested`]: `domain.name` → nested group structure
//! - [`builder`]: Language / Type / Tone layer trees
//! - [`merge`]: additive deep merge, duplicate gate, tree helpers

pub mod builder;
pub mod code_syntax;
pub mod merge;
pub mod nested;

/// A token document or partial tree: nested groups with token leaves.
pub type Document = serde_json::Map<String, serde_json::Value>;

pub use builder::{
    FileTokens, RandomReferenceKeys, ReferenceKeyGenerator, SequentialReferenceKeys, TokenBuilder,
};
pub use code_syntax::{android_syntax, code_syntax, ios_syntax, web_syntax};
pub use merge::{count_tokens, entry_exists, flatten, lookup, merge, reference_target};
pub use nested::nest;

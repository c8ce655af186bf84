//! Token matrix builder for the Language, Type and Tone layers.
//!
//! Three levels of indirection:
//!
//! - **Tone** files hold one user-selectable token per entry, pointing at the
//!   Type-layer token for that tone.
//! - **Type** files resolve a tone to the right text kind by pointing at the
//!   Language-layer literal.
//! - The **Language** file holds the 36 literal strings.
//!
//! Swapping the referenced tone never touches the generated text, and the
//! type resolution stays independent of tone.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::{Map, Value};

use super::code_syntax::code_syntax;
use super::nested::nest;
use super::Document;
use crate::error::{TokenError, TokenResult};
use crate::models::registry::{tone_by_abbr, type_by_abbr, LANGUAGE_FILE, TONES, TYPES};
use crate::models::{ContentMatrix, Layer, Token, TEXT_CONTENT_SCOPE};

/// Length in bytes of a reference key before hex encoding.
const REFERENCE_KEY_BYTES: usize = 20;

/// Source of opaque reference keys for Type- and Tone-layer tokens.
pub trait ReferenceKeyGenerator: Send + Sync {
    /// Returns a fresh key.
    fn next_key(&self) -> String;
}

/// Cryptographically random 40-character hex keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomReferenceKeys;

impl ReferenceKeyGenerator for RandomReferenceKeys {
    fn next_key(&self) -> String {
        let mut bytes = [0u8; REFERENCE_KEY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Deterministic keys (`ref-0001`, `ref-0002`, ...) for tests and previews.
#[derive(Debug, Default)]
pub struct SequentialReferenceKeys {
    counter: AtomicU64,
}

impl SequentialReferenceKeys {
    /// Creates a generator starting at `ref-0001`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReferenceKeyGenerator for SequentialReferenceKeys {
    fn next_key(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("ref-{n:04}")
    }
}

/// Partial token tree destined for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTokens {
    /// Target file name.
    pub file: &'static str,
    /// Layer the file belongs to.
    pub layer: Layer,
    /// Tree rooted at the document's top level.
    pub tree: Document,
}

/// Builds token trees for content entries.
#[derive(Debug, Default)]
pub struct TokenBuilder<G = RandomReferenceKeys> {
    keys: G,
}

impl TokenBuilder<RandomReferenceKeys> {
    /// Creates a builder using random reference keys.
    pub fn new() -> Self {
        Self {
            keys: RandomReferenceKeys,
        }
    }
}

impl<G: ReferenceKeyGenerator> TokenBuilder<G> {
    /// Creates a builder with a custom reference-key source.
    pub fn with_key_generator(keys: G) -> Self {
        Self { keys }
    }

    /// Language layer: 36 literal tokens grouped by tone.
    ///
    /// Shape: `domain.name.<toneFull>.lang--<toneAbbr>--<typeAbbr>--<name>`.
    pub fn language(
        &self,
        domain: &str,
        name: &str,
        content: &ContentMatrix,
    ) -> TokenResult<Document> {
        let mut name_group = Map::new();

        for tone in &TONES {
            let entry = content.entry(tone.tone);
            let mut tone_tokens = Map::new();

            for ty in &TYPES {
                let key = language_key(tone.abbr, ty.abbr, name);
                let path = format!("{domain}.{name}.{}.{key}", tone.full);
                let token = Token::text(
                    entry.text(ty.text_type),
                    Vec::new(),
                    code_syntax(&path),
                    true,
                    None,
                );
                tone_tokens.insert(key, serde_json::to_value(token)?);
            }

            name_group.insert(tone.full.to_string(), Value::Object(tone_tokens));
        }

        Ok(nest(domain, name, Value::Object(name_group)))
    }

    /// Type layer: 6 tokens (one per tone) for a single Type file.
    ///
    /// Each value references the Language-layer literal for that tone and type.
    pub fn type_layer(&self, domain: &str, name: &str, type_abbr: &str) -> TokenResult<Document> {
        let ty = type_by_abbr(type_abbr)
            .ok_or_else(|| TokenError::UnknownType(type_abbr.to_string()))?;
        let mut tokens = Map::new();

        for tone in &TONES {
            let key = type_key(tone.abbr, name);
            let path = format!("{domain}.{name}.{key}");
            let target = format!(
                "{domain}.{name}.{}.{}",
                tone.full,
                language_key(tone.abbr, ty.abbr, name)
            );
            let token = Token::text(
                reference(&target),
                Vec::new(),
                code_syntax(&path),
                true,
                Some(self.keys.next_key()),
            );
            tokens.insert(key, serde_json::to_value(token)?);
        }

        Ok(nest(domain, name, Value::Object(tokens)))
    }

    /// Tone layer: the single user-selectable token for a Tone file.
    pub fn tone_layer(&self, domain: &str, name: &str, tone_abbr: &str) -> TokenResult<Document> {
        let tone = tone_by_abbr(tone_abbr)
            .ok_or_else(|| TokenError::UnknownTone(tone_abbr.to_string()))?;
        let key = tone_key(name);
        let path = format!("{domain}.{name}.{key}");
        let target = format!("{domain}.{name}.{}", type_key(tone.abbr, name));
        let token = Token::text(
            reference(&target),
            vec![TEXT_CONTENT_SCOPE.to_string()],
            code_syntax(&path),
            false,
            Some(self.keys.next_key()),
        );

        let mut tokens = Map::new();
        tokens.insert(key, serde_json::to_value(token)?);
        Ok(nest(domain, name, Value::Object(tokens)))
    }

    /// All 13 partial trees for one entry: Language, Type files, Tone files.
    pub fn entry(
        &self,
        domain: &str,
        name: &str,
        content: &ContentMatrix,
    ) -> TokenResult<Vec<FileTokens>> {
        let mut files = Vec::with_capacity(1 + TYPES.len() + TONES.len());

        files.push(FileTokens {
            file: LANGUAGE_FILE,
            layer: Layer::Language,
            tree: self.language(domain, name, content)?,
        });

        for ty in &TYPES {
            files.push(FileTokens {
                file: ty.file,
                layer: Layer::Type,
                tree: self.type_layer(domain, name, ty.abbr)?,
            });
        }

        for tone in &TONES {
            files.push(FileTokens {
                file: tone.file,
                layer: Layer::Tone,
                tree: self.tone_layer(domain, name, tone.abbr)?,
            });
        }

        Ok(files)
    }
}

/// `lang--<toneAbbr>--<typeAbbr>--<name>`
pub fn language_key(tone_abbr: &str, type_abbr: &str, name: &str) -> String {
    format!("lang--{tone_abbr}--{type_abbr}--{name}")
}

/// `type--<toneAbbr>--<name>`
pub fn type_key(tone_abbr: &str, name: &str) -> String {
    format!("type--{tone_abbr}--{name}")
}

/// `tone--<name>`
pub fn tone_key(name: &str) -> String {
    format!("tone--{name}")
}

fn reference(path: &str) -> String {
    format!("{{{path}}}")
}

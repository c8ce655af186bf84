//! Apply, preview, list and resolve operations over the token file set.
//!
//! Apply runs in three phases so a failure never leaves the 13 files out of
//! step with each other:
//!
//! 1. read the Language document and run the duplicate gate
//! 2. read every other document, build and merge all 13 trees in memory
//! 3. write (skipped for dry runs)

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{TokenError, TokenResult};
use crate::models::registry::{tone_by_name, type_by_name};
use crate::models::{ContentMatrix, Layer, LANGUAGE_FILE};
use crate::services::token_store::TokenStore;
use crate::tokens::builder::tone_key;
use crate::tokens::merge::is_token;
use crate::tokens::{
    count_tokens, entry_exists, flatten, lookup, merge, reference_target, Document,
    RandomReferenceKeys, ReferenceKeyGenerator, TokenBuilder,
};

/// Request to add one content entry to the token files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    /// Dot-separated domain, e.g. `nav` or `legal.copyright`.
    pub domain: String,
    /// Entry name within the domain.
    pub name: String,
    /// Generated content.
    pub content: ContentMatrix,
    /// Check and count without writing.
    #[serde(default)]
    pub dry_run: bool,
}

/// Tokens added to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Token file name.
    pub file: String,
    /// Number of token leaves the merge added.
    pub tokens_added: usize,
}

/// Outcome of an apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    /// Per-file changes, Language first.
    pub files_modified: Vec<FileChange>,
    /// Sum of `tokens_added`.
    pub total_tokens: usize,
}

/// Tokens that would be written to one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFile {
    /// Token file name.
    pub file: String,
    /// Layer of the file.
    pub layer: Layer,
    /// Number of tokens.
    pub token_count: usize,
    /// Token path → `$value`.
    pub tokens: Map<String, Value>,
}

/// Preview of an entry across all files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    /// One entry per token file.
    pub files: Vec<PreviewFile>,
    /// Total tokens across files.
    pub total_tokens: usize,
}

/// Filters for listing Language-layer tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Only entries under this domain.
    pub domain: Option<String>,
    /// Tone full name or abbreviation.
    pub tone: Option<String>,
    /// Type full name or abbreviation.
    #[serde(rename = "type")]
    pub text_type: Option<String>,
}

/// One Language-layer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    /// Full dot path.
    pub path: String,
    /// Literal text.
    pub value: String,
    /// Tone abbreviation parsed from the key.
    pub tone: String,
    /// Type abbreviation parsed from the key.
    #[serde(rename = "type")]
    pub text_type: String,
}

/// Language-layer tokens grouped by `domain.name`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListResponse {
    /// Group path → tokens.
    pub entries: BTreeMap<String, Vec<TokenInfo>>,
}

/// One hop of a resolved reference chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionStep {
    /// File the token was found in.
    pub file: String,
    /// Token path.
    pub path: String,
    /// Raw `$value`.
    pub value: String,
}

/// Tone → Type → Language chain for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Hops in order, Tone file first.
    pub steps: Vec<ResolutionStep>,
    /// Literal text at the end of the chain.
    pub text: String,
}

fn language_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^lang--(\w+)--(\w+)--(.+)$").expect("language key pattern is valid")
    })
}

/// Coordinates the builder, merge engine and token store.
#[derive(Debug)]
pub struct ApplyService<G = RandomReferenceKeys> {
    store: TokenStore,
    builder: TokenBuilder<G>,
}

impl ApplyService<RandomReferenceKeys> {
    /// Creates a service with random reference keys.
    pub fn new(store: TokenStore) -> Self {
        Self {
            store,
            builder: TokenBuilder::new(),
        }
    }
}

impl<G: ReferenceKeyGenerator> ApplyService<G> {
    /// Creates a service with a custom builder.
    pub fn with_builder(store: TokenStore, builder: TokenBuilder<G>) -> Self {
        Self { store, builder }
    }

    /// Underlying store.
    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Returns true if `domain.name` is already in the Language document.
    pub fn is_duplicate(&self, domain: &str, name: &str) -> TokenResult<bool> {
        let language = self.store.read(LANGUAGE_FILE)?;
        Ok(entry_exists(&language, domain, name))
    }

    /// Adds one entry to all 13 token files.
    ///
    /// Fails with [`TokenError::DuplicateEntry`] before any write if the
    /// entry exists. A malformed or missing document also aborts before any
    /// write.
    pub fn apply(&self, request: &ApplyRequest) -> TokenResult<ApplyResult> {
        let ApplyRequest {
            domain,
            name,
            content,
            dry_run,
        } = request;
        let entry = format!("{domain}.{name}");

        let language = self.store.read(LANGUAGE_FILE)?;
        if entry_exists(&language, domain, name) {
            warn!(entry = %entry, "content entry already exists, nothing written");
            return Err(TokenError::DuplicateEntry(entry));
        }
        content.validate()?;

        let planned = self.builder.entry(domain, name, content)?;
        let mut language = Some(language);
        let mut staged = Vec::with_capacity(planned.len());

        for file_tokens in planned {
            let cached = if file_tokens.file == LANGUAGE_FILE {
                language.take()
            } else {
                None
            };
            let current = match cached {
                Some(doc) => doc,
                None => self.store.read(file_tokens.file)?,
            };
            let merged = merge(&current, &file_tokens.tree);
            let tokens_added = count_tokens(&merged).saturating_sub(count_tokens(&current));
            debug!(file = file_tokens.file, tokens_added, "merged tokens");
            staged.push((file_tokens.file, merged, tokens_added));
        }

        if *dry_run {
            info!(entry = %entry, "dry run, no files written");
        } else {
            for (file, doc, _) in &staged {
                self.store.write(file, doc)?;
            }
        }

        let files_modified: Vec<FileChange> = staged
            .into_iter()
            .map(|(file, _, tokens_added)| FileChange {
                file: file.to_string(),
                tokens_added,
            })
            .collect();
        let total_tokens = files_modified.iter().map(|f| f.tokens_added).sum();

        info!(
            entry = %entry,
            files = files_modified.len(),
            total_tokens,
            dry_run = *dry_run,
            "applied content entry"
        );

        Ok(ApplyResult {
            files_modified,
            total_tokens,
        })
    }

    /// Builds the tokens for an entry without touching any file.
    pub fn preview(
        &self,
        domain: &str,
        name: &str,
        content: &ContentMatrix,
    ) -> TokenResult<PreviewResponse> {
        content.validate()?;
        let files: Vec<PreviewFile> = self
            .builder
            .entry(domain, name, content)?
            .into_iter()
            .map(|file_tokens| {
                let tokens: Map<String, Value> = flatten(&file_tokens.tree)
                    .into_iter()
                    .map(|(path, value)| (path, Value::String(value)))
                    .collect();
                PreviewFile {
                    file: file_tokens.file.to_string(),
                    layer: file_tokens.layer,
                    token_count: tokens.len(),
                    tokens,
                }
            })
            .collect();
        let total_tokens = files.iter().map(|f| f.token_count).sum();

        Ok(PreviewResponse {
            files,
            total_tokens,
        })
    }

    /// Lists Language-layer tokens grouped by `domain.name`.
    ///
    /// An unknown domain yields an empty listing.
    pub fn list(&self, query: &ListQuery) -> TokenResult<ListResponse> {
        let language = self.store.read(LANGUAGE_FILE)?;

        let domain = query.domain.as_deref().filter(|d| !d.is_empty());
        let (root, prefix) = match domain {
            Some(domain) => match lookup(&language, domain).and_then(Value::as_object) {
                Some(group) => (group, domain),
                None => return Ok(ListResponse::default()),
            },
            None => (&language, ""),
        };

        let tone = query
            .tone
            .as_deref()
            .map(|t| tone_by_name(t).map_or(t, |def| def.abbr));
        let text_type = query
            .text_type
            .as_deref()
            .map(|t| type_by_name(t).map_or(t, |def| def.abbr));

        let mut response = ListResponse::default();
        collect_entries(root, prefix, tone, text_type, &mut response.entries);
        Ok(response)
    }

    /// Follows the Tone → Type → Language chain for one entry.
    ///
    /// `tone` and `text_type` accept full names or abbreviations. Returns
    /// `Ok(None)` if a hop is missing or the chain ends on a reference.
    pub fn resolve(
        &self,
        domain: &str,
        name: &str,
        tone: &str,
        text_type: &str,
    ) -> TokenResult<Option<Resolution>> {
        let tone_def = tone_by_name(tone).ok_or_else(|| TokenError::UnknownTone(tone.to_string()))?;
        let type_def =
            type_by_name(text_type).ok_or_else(|| TokenError::UnknownType(text_type.to_string()))?;

        let mut path = format!("{domain}.{name}.{}", tone_key(name));
        let mut steps = Vec::with_capacity(3);

        for file in [tone_def.file, type_def.file, LANGUAGE_FILE] {
            let doc = self.store.read(file)?;
            let Some(value) = token_value(&doc, &path) else {
                return Ok(None);
            };
            steps.push(ResolutionStep {
                file: file.to_string(),
                path: path.clone(),
                value: value.to_string(),
            });

            match reference_target(value) {
                Some(target) => path = target.to_string(),
                None => {
                    return Ok(Some(Resolution {
                        text: value.to_string(),
                        steps,
                    }))
                }
            }
        }

        Ok(None)
    }
}

fn token_value<'a>(doc: &'a Document, path: &str) -> Option<&'a str> {
    lookup(doc, path)
        .filter(|v| is_token(v))
        .and_then(|v| v.get("$value"))
        .and_then(Value::as_str)
}

fn collect_entries(
    group: &Document,
    prefix: &str,
    tone: Option<&str>,
    text_type: Option<&str>,
    out: &mut BTreeMap<String, Vec<TokenInfo>>,
) {
    for (key, value) in group {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if is_token(value) {
            let Some(caps) = language_key_pattern().captures(key) else {
                continue;
            };
            let (key_tone, key_type) = (&caps[1], &caps[2]);
            if tone.is_some_and(|t| t != key_tone) || text_type.is_some_and(|t| t != key_type) {
                continue;
            }

            // domain.name: drop the tone group and the token key
            let segments: Vec<&str> = path.split('.').collect();
            let group_key = segments[..segments.len().saturating_sub(2)].join(".");

            out.entry(group_key).or_default().push(TokenInfo {
                path: path.clone(),
                value: match value.get("$value") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                },
                tone: key_tone.to_string(),
                text_type: key_type.to_string(),
            });
        } else if let Some(child) = value.as_object() {
            collect_entries(child, &path, tone, text_type, out);
        }
    }
}

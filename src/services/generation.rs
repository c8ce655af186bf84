//! Content generation collaborator.
//!
//! Generation itself happens outside this crate. A [`ContentGenerator`]
//! returns the raw model payload; [`generate_content`] parses and validates
//! it as a [`ContentMatrix`], retrying up to a fixed attempt budget.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{TokenError, TokenResult};
use crate::models::ContentMatrix;

/// Default number of generation attempts per entry.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Instructions given to the text model.
pub const SYSTEM_PROMPT: &str = r#"You are a UX copywriter generating content for a design token system. You produce text in 6 tones × 6 types = 36 variations.

## Tones

- **Neutral**: Clear, direct, professional. No personality flourishes. Default corporate voice.
- **Formal**: Authoritative, precise, institutional. Legal or academic register.
- **Playful**: Warm, friendly, enthusiastic. Uses exclamation marks, casual phrasing.
- **Minimal**: Extremely concise. Fewest possible words. Telegram-style.
- **Witty**: Clever, self-aware, dry humor. Wordplay welcome.
- **Quirky**: Eccentric, unexpected metaphors, personality-heavy. Memorable and unique.

## Types

- **title**: Primary heading. 1-4 words. Capitalized appropriately for the tone.
- **subtitle**: Supporting line. 3-8 words. Adds context to the title.
- **description**: Full explanation. 1-2 sentences. Informative and complete.
- **caption**: Supplementary detail. Short phrase or sentence. Metadata-like.
- **abbreviation**: Shortest possible representation. 1-4 characters (symbol, initials, or very short word).
- **emoji**: Single emoji that represents the concept.

## Output Format

Return ONLY valid JSON matching this exact structure (no markdown, no explanation):
{
  "neutral": { "title": "", "subtitle": "", "description": "", "caption": "", "abbreviation": "", "emoji": "" },
  "formal": { "title": "", "subtitle": "", "description": "", "caption": "", "abbreviation": "", "emoji": "" },
  "playful": { "title": "", "subtitle": "", "description": "", "caption": "", "abbreviation": "", "emoji": "" },
  "minimal": { "title": "", "subtitle": "", "description": "", "caption": "", "abbreviation": "", "emoji": "" },
  "witty": { "title": "", "subtitle": "", "description": "", "caption": "", "abbreviation": "", "emoji": "" },
  "quirky": { "title": "", "subtitle": "", "description": "", "caption": "", "abbreviation": "", "emoji": "" }
}"#;

/// What to generate content for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Dot-separated domain.
    pub domain: String,
    /// Entry name.
    pub name: String,
    /// Human-readable neutral title the content is about.
    pub neutral_title: String,
    /// Extra guidance for the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl GenerateRequest {
    /// Renders the user prompt for this request.
    pub fn user_prompt(&self) -> String {
        let mut prompt = format!(
            "Generate content for: \"{}\"\nDomain: {}\nEntry name: {}",
            self.neutral_title, self.domain, self.name
        );
        if let Some(context) = &self.context {
            prompt.push_str(&format!("\nAdditional context: {context}"));
        }
        prompt
    }
}

/// Generated content for one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Domain the content was generated for.
    pub domain: String,
    /// Entry name.
    pub name: String,
    /// Validated content.
    pub content: ContentMatrix,
}

/// Produces a raw text payload for a request.
pub trait ContentGenerator: Send + Sync {
    /// Runs one generation attempt.
    fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

/// Calls `generator` until it yields a valid matrix or the budget runs out.
///
/// Generator errors, unparseable payloads and shape violations all consume
/// one attempt. `max_attempts` of zero is treated as one.
pub fn generate_content(
    generator: &dyn ContentGenerator,
    request: &GenerateRequest,
    max_attempts: u32,
) -> TokenResult<ContentMatrix> {
    let attempts = max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        debug!(
            domain = %request.domain,
            name = %request.name,
            attempt,
            "requesting content"
        );

        let outcome = generator
            .generate(request)
            .map_err(|e| format!("{e:#}"))
            .and_then(|payload| ContentMatrix::from_json(&payload).map_err(|e| e.to_string()));

        match outcome {
            Ok(matrix) => return Ok(matrix),
            Err(reason) => {
                warn!(attempt, %reason, "generation attempt failed");
                last_error = reason;
            }
        }
    }

    Err(TokenError::Generation {
        attempts,
        reason: last_error,
    })
}

/// JSON written to the stdin of a [`CommandGenerator`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandInput<'a> {
    system: &'a str,
    prompt: String,
    #[serde(flatten)]
    request: &'a GenerateRequest,
}

/// Delegates generation to an external command.
///
/// The command receives `{system, prompt, domain, name, neutralTitle,
/// context?}` as JSON on stdin and must print the content matrix JSON on
/// stdout. A non-zero exit status fails the attempt.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Creates a generator running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl ContentGenerator for CommandGenerator {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let input = serde_json::to_vec(&CommandInput {
            system: SYSTEM_PROMPT,
            prompt: request.user_prompt(),
            request,
        })
        .context("Failed to serialize generation request")?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context(format!("Failed to execute '{}'", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&input)
                .context("Failed to write request to generator stdin")?;
        }

        let output = child
            .wait_with_output()
            .context(format!("Failed to wait for '{}'", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        String::from_utf8(output.stdout).context("Generator output is not valid UTF-8")
    }
}
